use leptess::{LepTess, Variable};
use tracing::debug;

use super::engine::{EngineSession, RawRecognition, RecognitionEngine};
use crate::error::{Result, ScanError};
use crate::recognition::EngineParameterSet;

/// Local Tesseract engine driven through `leptess`.
///
/// A fresh `LepTess` is created per session because whitelists and
/// segmentation modes differ between requests.
pub struct TesseractEngine {
    data_path: Option<String>,
}

impl TesseractEngine {
    pub fn new(data_path: Option<String>) -> Self {
        Self { data_path }
    }

    /// Check that Tesseract and the `language` traineddata can be loaded.
    pub fn probe(&self, language: &str) -> std::result::Result<(), String> {
        LepTess::new(self.data_path.as_deref(), language)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Map a parameter name to the leptess variable that sets it at runtime.
///
/// Init-only parameters such as `tessedit_ocr_engine_mode` have no runtime
/// setter and map to `None`.
fn runtime_variable(name: &str) -> Option<Variable> {
    match name {
        "tessedit_pageseg_mode" => Some(Variable::TesseditPagesegMode),
        "tessedit_char_whitelist" => Some(Variable::TesseditCharWhitelist),
        "preserve_interword_spaces" => Some(Variable::PreserveInterwordSpaces),
        "tessedit_create_hocr" => Some(Variable::TesseditCreateHocr),
        "tessedit_create_tsv" => Some(Variable::TesseditCreateTsv),
        "textord_min_linesize" => Some(Variable::TextordMinLinesize),
        _ => None,
    }
}

impl RecognitionEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn start(
        &self,
        language: &str,
        params: &EngineParameterSet,
    ) -> Result<Box<dyn EngineSession>> {
        let mut lt = LepTess::new(self.data_path.as_deref(), language).map_err(|e| {
            ScanError::EngineFailure(format!(
                "Failed to initialize Tesseract for '{language}': {e}"
            ))
        })?;

        for (name, value) in params.iter() {
            match runtime_variable(name) {
                Some(variable) => lt.set_variable(variable, value).map_err(|e| {
                    ScanError::EngineFailure(format!("Failed to set {name}={value}: {e}"))
                })?,
                None => debug!(name, value, "Skipping parameter without a runtime setter"),
            }
        }

        debug!(language, "Tesseract worker started");
        Ok(Box::new(TesseractSession { lt }))
    }
}

struct TesseractSession {
    lt: LepTess,
}

impl EngineSession for TesseractSession {
    fn recognize(&mut self, image: &[u8]) -> Result<RawRecognition> {
        self.lt
            .set_image_from_mem(image)
            .map_err(|e| ScanError::EngineFailure(format!("Failed to set image: {e}")))?;

        let text = self
            .lt
            .get_utf8_text()
            .map_err(|e| ScanError::EngineFailure(format!("Failed to extract text: {e}")))?;

        let confidence = self.lt.mean_text_conf() as f32;
        let lines = self
            .lt
            .get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_TEXTLINE, true)
            .map(|boxes| (&boxes).into_iter().count());

        Ok(RawRecognition {
            text,
            confidence,
            lines,
        })
    }
}

impl Drop for TesseractSession {
    fn drop(&mut self) {
        debug!("Tesseract worker released");
    }
}
