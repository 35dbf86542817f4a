use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Missing attachment: {0}")]
    MissingAttachment(String),

    #[error("Recognition failed: {0}")]
    EngineFailure(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),
}

impl IntoResponse for ScanError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
