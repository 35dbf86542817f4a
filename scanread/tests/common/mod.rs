// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use scanread::error::{Result, ScanError};
use scanread::ocr::{EngineSession, RawRecognition, RecognitionEngine};
use scanread::recognition::EngineParameterSet;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Engine stand-in that returns canned text and counts live sessions.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    pub text: String,
    pub error: Option<String>,
    pub live: Arc<AtomicUsize>,
    pub started: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn live_sessions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn sessions_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn start(
        &self,
        _language: &str,
        _params: &EngineParameterSet,
    ) -> Result<Box<dyn EngineSession>> {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            engine: self.clone(),
        }))
    }
}

struct ScriptedSession {
    engine: ScriptedEngine,
}

impl EngineSession for ScriptedSession {
    fn recognize(&mut self, _image: &[u8]) -> Result<RawRecognition> {
        if let Some(message) = &self.engine.error {
            return Err(ScanError::EngineFailure(message.clone()));
        }
        Ok(RawRecognition {
            text: self.engine.text.clone(),
            confidence: 88.5,
            lines: Some(self.engine.text.lines().count()),
        })
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.engine.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Build a multipart body from `(name, filename, content_type, bytes)` parts.
pub fn multipart_body(
    boundary: &str,
    parts: &[(&str, Option<&str>, Option<&str>, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
