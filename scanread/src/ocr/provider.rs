use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::engine::RecognitionEngine;
use super::tesseract::TesseractEngine;
use crate::config::OcrConfig;
use crate::error::{Result, ScanError};
use crate::recognition::{build_parameters, post_process, RecognitionRequest};

/// Cleaned recognition result plus the options that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrOutcome {
    pub text: String,
    pub confidence: f32,
    pub engine: String,
    pub mode: String,
    pub language: String,
    pub lines: Option<usize>,
}

#[derive(Clone)]
enum OcrBackend {
    Engine(Arc<dyn RecognitionEngine>),
    Unavailable { reason: String },
}

#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
}

impl OcrProvider {
    /// Create a provider backed by local Tesseract.
    ///
    /// A missing Tesseract install or traineddata does not fail startup; the
    /// provider reports itself unavailable and requests get a 503.
    pub fn new(config: &OcrConfig) -> Self {
        let engine = TesseractEngine::new(config.data_path.clone());
        let backend = match engine.probe(&config.default_language) {
            Ok(()) => {
                info!(language = %config.default_language, "Tesseract OCR initialized");
                OcrBackend::Engine(Arc::new(engine))
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    /// Create a provider around an already constructed engine.
    pub fn with_engine(engine: Arc<dyn RecognitionEngine>, config: &OcrConfig) -> Self {
        Self {
            backend: OcrBackend::Engine(engine),
            config: config.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, OcrBackend::Engine(_))
    }

    pub fn engine_name(&self) -> Option<&'static str> {
        match &self.backend {
            OcrBackend::Engine(engine) => Some(engine.name()),
            OcrBackend::Unavailable { .. } => None,
        }
    }

    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    /// Configure, run, and post-process one recognition.
    ///
    /// The engine session lives entirely inside a blocking task and is dropped
    /// there whether recognition succeeds or fails. On timeout the task keeps
    /// running to completion and still releases its session.
    pub async fn recognize(&self, request: RecognitionRequest) -> Result<OcrOutcome> {
        let engine = match &self.backend {
            OcrBackend::Engine(engine) => Arc::clone(engine),
            OcrBackend::Unavailable { reason } => {
                return Err(ScanError::EngineUnavailable(reason.clone()))
            }
        };

        let RecognitionRequest {
            mode,
            language,
            image,
        } = request;

        let params = build_parameters(&mode, &language);
        let engine_name = engine.name();
        debug!(
            engine = engine_name,
            %mode,
            %language,
            filename = %image.filename,
            bytes = image.bytes.len(),
            params = params.len(),
            "Starting recognition"
        );

        let task_language = language.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut session = engine.start(&task_language, &params)?;
            session.recognize(&image.bytes)
        });

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let raw = match tokio::time::timeout(timeout_duration, task).await {
            Ok(joined) => joined
                .map_err(|e| ScanError::EngineFailure(format!("OCR task panicked: {e}")))??,
            Err(_) => {
                return Err(ScanError::EngineFailure(format!(
                    "OCR operation timed out after {} seconds",
                    self.config.timeout_secs
                )))
            }
        };

        let text = post_process(&raw.text, &language);
        debug!(
            raw_chars = raw.text.chars().count(),
            cleaned_chars = text.chars().count(),
            confidence = raw.confidence,
            "Recognition finished"
        );

        Ok(OcrOutcome {
            text,
            confidence: raw.confidence,
            engine: engine_name.to_string(),
            mode: mode.to_string(),
            language,
            lines: raw.lines,
        })
    }
}
