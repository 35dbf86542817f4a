//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`] envelope with two optional
//! top-level fields:
//!
//! ```json
//! {
//!   "data": { ... },    // present on success, absent on error
//!   "error": { "code": "missing_attachment", "message": "..." }  // present on error
//! }
//! ```
//!
//! The `code` values are stable and meant for programmatic handling;
//! `message` is for display.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"malformed_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The body is not valid multipart: no boundary, or no delimiter found.
    /// HTTP 400.
    MalformedRequest,
    /// The form has no file under the `image` field. HTTP 400.
    MissingAttachment,
    /// Authentication is required or the provided credentials are invalid.
    /// HTTP 401.
    Unauthorized,
    /// The OCR engine reported an error. The message carries its details.
    /// HTTP 500.
    EngineFailure,
    /// An unexpected server-side error occurred. HTTP 500.
    InternalError,
    /// No OCR engine could be loaded on this server. HTTP 503.
    EngineUnavailable,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest | Self::MissingAttachment => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EngineFailure | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::EngineUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRequest => write!(f, "malformed_request"),
            Self::MissingAttachment => write!(f, "missing_attachment"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::EngineFailure => write!(f, "engine_failure"),
            Self::InternalError => write!(f, "internal_error"),
            Self::EngineUnavailable => write!(f, "engine_unavailable"),
        }
    }
}

/// Structured error payload within the API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

/// Canonical v1 API response envelope.
///
/// On success `data` is present and `error` is absent; on error the reverse.
/// The HTTP status is derived from the error code, or 200 on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize v1 response");
                let fallback = ApiResponse::<()>::error(
                    ErrorCode::InternalError,
                    "An internal error occurred",
                );
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (fallback.status, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<ScanError> for ApiResponse<T> {
    /// Convert a [`ScanError`] into a v1 [`ApiResponse`].
    ///
    /// Client errors carry their message as-is. Engine failures are logged and
    /// keep their message so the caller can show what the engine reported.
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MalformedRequest(msg) => {
                ApiResponse::error(ErrorCode::MalformedRequest, msg)
            }
            ScanError::MissingAttachment(msg) => {
                ApiResponse::error(ErrorCode::MissingAttachment, msg)
            }
            ScanError::EngineFailure(msg) => {
                tracing::error!(error = %msg, "Recognition failed");
                ApiResponse::error(ErrorCode::EngineFailure, msg)
            }
            ScanError::EngineUnavailable(msg) => {
                tracing::warn!(reason = %msg, "Recognition requested but no engine is loaded");
                ApiResponse::error(ErrorCode::EngineUnavailable, msg)
            }
        }
    }
}
