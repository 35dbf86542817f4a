use std::collections::HashMap;

/// Filename recorded when a part declares `filename=""`.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Content type recorded when a file part has no `Content-Type` header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Decoded multipart body.
///
/// A part name lives in exactly one of `fields` or `files`. When the same name
/// is sent twice, the later part wins, even if it switches kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, FileAttachment>,
}

impl ParsedForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn file(&self, name: &str) -> Option<&FileAttachment> {
        self.files.get(name)
    }

    /// Number of parts that survived classification.
    pub fn len(&self) -> usize {
        self.fields.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }

    pub(crate) fn insert_field(&mut self, name: String, value: String) {
        self.files.remove(&name);
        self.fields.insert(name, value);
    }

    pub(crate) fn insert_file(&mut self, name: String, file: FileAttachment) {
        self.fields.remove(&name);
        self.files.insert(name, file);
    }
}
