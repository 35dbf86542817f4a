//! v1 OCR handler.
//!
//! Accepts a raw `multipart/form-data` body, decodes it with the in-house
//! decoder, and runs recognition on the `image` part.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};

use crate::api::v1::dto::{OcrResponse, OcrUploadForm};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::error::Result;
use crate::multipart::{boundary_from_content_type, decode};
use crate::recognition::{language_has_tables, RecognitionRequest};

/// `POST /api/v1/ocr`
///
/// Recognizes text in the uploaded image and returns it post-processed for
/// the requested mode and language.
#[utoipa::path(
    post,
    path = "/api/v1/ocr",
    tag = "ocr",
    operation_id = "ocr.recognize",
    request_body(content = OcrUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Text recognized", body = OcrResponse),
        (status = 400, description = "Malformed multipart body or missing image", body = ApiError),
        (status = 401, description = "Missing or invalid API key", body = ApiError),
        (status = 500, description = "Recognition failed", body = ApiError),
        (status = 503, description = "No OCR engine available", body = ApiError),
    )
)]
pub async fn recognize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiResponse<OcrResponse>> {
    let boundary = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(boundary_from_content_type);

    let form = decode(&body, boundary.as_deref())?;
    let request = RecognitionRequest::from_form(form, state.ocr.default_language())?;

    tracing::info!(
        mode = %request.mode,
        language = %request.language,
        language_tables = language_has_tables(&request.language),
        filename = %request.image.filename,
        content_type = %request.image.content_type,
        bytes = request.image.bytes.len(),
        "Recognition requested"
    );

    let outcome = state.ocr.recognize(request).await?;
    Ok(ApiResponse::success(outcome.into()))
}
