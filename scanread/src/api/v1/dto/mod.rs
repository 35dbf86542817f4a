//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are separate
//! from `ocr::OcrOutcome` so the internal result can change without breaking
//! clients.

pub mod ocr;

pub use ocr::*;
