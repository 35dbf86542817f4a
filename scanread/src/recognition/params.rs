use std::collections::BTreeMap;

use super::mode::RecognitionMode;

/// Page segmentation: treat the image as a single uniform block of text.
const PSM_SINGLE_BLOCK: &str = "6";
/// Page segmentation: fully automatic, no OSD.
const PSM_AUTO: &str = "3";
/// Engine mode: LSTM neural net only.
const OEM_LSTM_ONLY: &str = "1";

const HANDWRITING_WHITELIST: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789.,!?;:'\"()-/",
);

const LATVIAN_WHITELIST: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "ĀČĒĢĪĶĻŅŠŪŽ",
    "āčēģīķļņšūž",
    "0123456789.,!?;:'\"()-/",
);

const RUSSIAN_WHITELIST: &str = concat!(
    "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ",
    "абвгдеёжзийклмнопрстуфхцчшщъыьэюя",
    "0123456789.,!?;:'\"()-/",
);

const BASE_LAYER: &[(&str, &str)] = &[
    ("tessedit_pageseg_mode", PSM_SINGLE_BLOCK),
    ("tessedit_ocr_engine_mode", OEM_LSTM_ONLY),
    ("preserve_interword_spaces", "1"),
    ("tessedit_create_hocr", "0"),
    ("tessedit_create_tsv", "0"),
];

const FAST_LAYER: &[(&str, &str)] = &[("tessedit_pageseg_mode", PSM_SINGLE_BLOCK)];

const ADVANCED_LAYER: &[(&str, &str)] = &[
    ("tessedit_pageseg_mode", PSM_AUTO),
    ("textord_min_linesize", "2.5"),
];

const HANDWRITING_LAYER: &[(&str, &str)] = &[
    ("tessedit_pageseg_mode", PSM_SINGLE_BLOCK),
    ("textord_min_linesize", "1.5"),
    ("tessedit_char_whitelist", HANDWRITING_WHITELIST),
];

const LANGUAGE_LAYERS: &[(&str, &[(&str, &str)])] = &[
    ("lav", &[("tessedit_char_whitelist", LATVIAN_WHITELIST)]),
    ("rus", &[("tessedit_char_whitelist", RUSSIAN_WHITELIST)]),
];

/// Flat engine parameter map, keyed by Tesseract variable name.
///
/// Ordered so that logs and applied settings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineParameterSet(BTreeMap<String, String>);

impl EngineParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `layer` onto the set; later entries replace earlier ones.
    pub fn extend_from(&mut self, layer: &[(&str, &str)]) {
        for (key, value) in layer {
            self.0.insert((*key).to_string(), (*value).to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn mode_layer(mode: &RecognitionMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        RecognitionMode::Fast => FAST_LAYER,
        RecognitionMode::Advanced => ADVANCED_LAYER,
        RecognitionMode::Handwriting => HANDWRITING_LAYER,
        RecognitionMode::Unknown(_) => &[],
    }
}

fn language_layer(language: &str) -> &'static [(&'static str, &'static str)] {
    let language = language.trim().to_lowercase();
    LANGUAGE_LAYERS
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, layer)| *layer)
        .unwrap_or(&[])
}

/// Whether `language` gets tailored parameters or corrections.
pub fn language_has_tables(language: &str) -> bool {
    !language_layer(language).is_empty()
}

/// Assemble the engine parameters for a request.
///
/// Layers apply in order base, mode, language, so a language whitelist
/// replaces a mode whitelist. Unknown modes and languages add nothing.
pub fn build_parameters(mode: &RecognitionMode, language: &str) -> EngineParameterSet {
    let mut params = EngineParameterSet::new();
    params.extend_from(BASE_LAYER);
    params.extend_from(mode_layer(mode));
    params.extend_from(language_layer(language));
    params
}
