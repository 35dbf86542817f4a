//! Recognition Pipeline Configurator
//!
//! Turns the user-facing `mode` and `language` options into engine parameters
//! before recognition, and cleans the engine's raw text afterwards.
//!
//! Both halves are permissive: an unknown mode or language never fails, it
//! simply contributes no overrides or corrections.
//!
//! - `build_parameters` layers base, mode, and language tables
//! - `post_process` squeezes blank lines, applies confusion fixes, and strips
//!   diacritics for languages that have a table

mod mode;
mod params;
mod postprocess;
mod request;

pub use mode::RecognitionMode;
pub use params::{build_parameters, language_has_tables, EngineParameterSet};
pub use postprocess::post_process;
pub use request::{RecognitionRequest, DEFAULT_LANGUAGE, IMAGE_FIELD};
