//! Multipart Form Decoder
//!
//! A small, byte-level decoder for `multipart/form-data` request bodies. It
//! covers exactly what the OCR endpoint needs: one boundary, a handful of named
//! parts, each either a plain text field or a single file attachment.
//!
//! # Architecture
//!
//! - `boundary_from_content_type` pulls the boundary token out of the request's
//!   `Content-Type` header
//! - `decode` scans the buffered body for `--<boundary>` with `memchr::memmem`
//!   and classifies each segment between delimiters
//! - `headers` parses the per-part header block (`Content-Disposition`,
//!   `Content-Type`) without copying
//!
//! The whole body must already be in memory. Size limits are enforced by the
//! HTTP layer before the decoder runs.
//!
//! # Usage
//!
//! ```rust,ignore
//! let boundary = boundary_from_content_type(content_type);
//! let form = decode(&body, boundary.as_deref())?;
//! let image = form.file("image");
//! ```

mod decoder;
mod form;
mod headers;

pub use decoder::{boundary_from_content_type, decode};
pub use form::{FileAttachment, ParsedForm, DEFAULT_CONTENT_TYPE, UNKNOWN_FILENAME};
