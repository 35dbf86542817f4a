use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ocr::OcrOutcome;

/// Multipart form accepted by `POST /api/v1/ocr`.
///
/// Only documents the wire format; the body is decoded by
/// `crate::multipart::decode`, not deserialized into this type.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OcrUploadForm {
    /// Image to recognize.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// `fast` (default), `advanced`, or `handwriting`. Unknown values use the
    /// `fast` defaults.
    pub mode: Option<String>,
    /// Tesseract language code, e.g. `eng` (default), `lav`, `rus`, or
    /// `eng+lav`.
    pub language: Option<String>,
}

/// Recognized text and the settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    /// Post-processed text.
    pub text: String,
    /// Mean word confidence, 0-100.
    pub confidence: f32,
    /// Engine that ran the recognition.
    pub engine: String,
    pub mode: String,
    pub language: String,
    /// Number of text lines the engine segmented, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
}

impl From<OcrOutcome> for OcrResponse {
    fn from(outcome: OcrOutcome) -> Self {
        Self {
            text: outcome.text,
            confidence: outcome.confidence,
            engine: outcome.engine,
            mode: outcome.mode,
            language: outcome.language,
            line_count: outcome.lines,
        }
    }
}
