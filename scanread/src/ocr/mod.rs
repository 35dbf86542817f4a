//! OCR (Optical Character Recognition) Module
//!
//! Runs the configured engine against an uploaded image.
//!
//! # Architecture
//!
//! - `RecognitionEngine` / `EngineSession` define the engine seam: a session
//!   is a configured worker, released when dropped
//! - `TesseractEngine` implements it locally via leptess
//! - `OcrProvider` owns the backend, builds parameters for each request, runs
//!   the session on the blocking pool under a timeout, and post-processes
//!   the text
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `data_path`: tessdata directory, Tesseract's default when unset
//! - `default_language`: language used when the form omits one
//! - `timeout_secs`: upper bound for a single recognition
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr);
//! let outcome = ocr.recognize(request).await?;
//! ```

mod engine;
#[cfg(test)]
pub(crate) mod fake;
mod provider;
mod tesseract;

pub use engine::{EngineSession, RawRecognition, RecognitionEngine};
pub use provider::{OcrOutcome, OcrProvider};
pub use tesseract::TesseractEngine;
