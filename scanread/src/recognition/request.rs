use tracing::warn;

use super::mode::RecognitionMode;
use crate::error::{Result, ScanError};
use crate::multipart::{FileAttachment, ParsedForm};

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Form field carrying the image to recognize.
pub const IMAGE_FIELD: &str = "image";
const MODE_FIELD: &str = "mode";
const LANGUAGE_FIELD: &str = "language";

/// Options and payload for a single recognition run.
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub mode: RecognitionMode,
    pub language: String,
    pub image: FileAttachment,
}

impl RecognitionRequest {
    /// Build a request from a decoded form, consuming the image part.
    ///
    /// `mode` and `language` are optional. A language code that the engine
    /// could not load as a traineddata name falls back to the default.
    pub fn from_form(mut form: ParsedForm, default_language: &str) -> Result<Self> {
        let image = form.files.remove(IMAGE_FIELD).ok_or_else(|| {
            ScanError::MissingAttachment(format!(
                "No file uploaded under the `{IMAGE_FIELD}` field"
            ))
        })?;

        let mode = form
            .field(MODE_FIELD)
            .map(RecognitionMode::parse)
            .unwrap_or_default();

        let language = normalize_language(form.field(LANGUAGE_FIELD), default_language);

        Ok(Self {
            mode,
            language,
            image,
        })
    }
}

/// Tesseract language specs are traineddata names joined by `+`.
fn is_valid_language(code: &str) -> bool {
    !code.is_empty()
        && code.split('+').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn normalize_language(requested: Option<&str>, default_language: &str) -> String {
    let requested = requested.map(str::trim).unwrap_or_default();
    if requested.is_empty() {
        return default_language.to_string();
    }
    if !is_valid_language(requested) {
        warn!(
            language = requested,
            fallback = default_language,
            "Ignoring unusable language code"
        );
        return default_language.to_string();
    }
    requested.to_lowercase()
}
