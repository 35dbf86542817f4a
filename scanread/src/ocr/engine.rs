use crate::error::Result;
use crate::recognition::EngineParameterSet;

/// What the engine reports for one image, before post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecognition {
    pub text: String,
    /// Mean word confidence on a 0-100 scale.
    pub confidence: f32,
    /// Number of text lines found, when the engine segments lines.
    pub lines: Option<usize>,
}

/// An OCR engine that can be configured per request.
///
/// `start` acquires a worker configured for one language and parameter set.
/// The worker is released when the returned session is dropped, so every exit
/// path (success, engine error, panic while unwinding) frees it.
pub trait RecognitionEngine: Send + Sync {
    /// Identifier echoed in responses, e.g. `"tesseract"`.
    fn name(&self) -> &'static str;

    fn start(&self, language: &str, params: &EngineParameterSet)
        -> Result<Box<dyn EngineSession>>;
}

/// A configured engine worker. Dropping it releases the worker.
pub trait EngineSession: Send {
    fn recognize(&mut self, image: &[u8]) -> Result<RawRecognition>;
}
