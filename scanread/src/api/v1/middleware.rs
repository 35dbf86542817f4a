//! # V1 API Key Authentication Middleware
//!
//! Optional Bearer token authentication for the OCR route. When
//! `SCANREAD_API_KEYS` is unset the route is open; once any key is configured
//! every request must present one of them.
//!
//! Errors use the v1 `ApiResponse` JSON envelope so they match the rest of
//! the API.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// Axum middleware that enforces Bearer token authentication when keys are
/// configured.
///
/// - No keys configured → the request passes through.
/// - Missing or malformed `Authorization: Bearer <token>` header → 401.
/// - Token not in the configured list → 401.
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let api_keys = &state.config.server.api_keys;
    if api_keys.is_empty() {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        Some(_) => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Invalid authorization header format. Expected: Bearer <token>",
            )
            .into_response();
        }
        None => {
            return ApiResponse::<()>::error(
                ErrorCode::Unauthorized,
                "Missing authorization header",
            )
            .into_response();
        }
    };

    if api_keys.iter().any(|key| key == token) {
        next.run(request).await
    } else {
        ApiResponse::<()>::error(ErrorCode::Unauthorized, "Invalid API key").into_response()
    }
}
