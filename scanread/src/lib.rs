//! Scanread: an HTTP OCR endpoint.
//!
//! Upload an image as `multipart/form-data`; the body is decoded by the
//! in-house [`multipart`] decoder, the requested `mode` and `language` are
//! mapped to engine parameters by [`recognition`], Tesseract runs through
//! [`ocr`], and the cleaned text comes back in a JSON envelope from [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod multipart;
pub mod ocr;
pub mod recognition;
