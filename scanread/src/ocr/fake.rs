//! In-process engine used by unit tests; records what it was asked to do.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::engine::{EngineSession, RawRecognition, RecognitionEngine};
use crate::error::{Result, ScanError};
use crate::recognition::EngineParameterSet;

#[derive(Clone, Default)]
pub(crate) struct FakeEngine {
    pub text: String,
    pub fail_recognize: bool,
    pub panic_recognize: bool,
    /// Time spent inside `recognize` before answering.
    pub delay: Option<Duration>,
    pub live_sessions: Arc<AtomicUsize>,
    pub started: Arc<Mutex<Vec<(String, EngineParameterSet)>>>,
}

impl FakeEngine {
    pub fn returning(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_recognize: true,
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_recognize: true,
            ..Self::default()
        }
    }

    pub fn slow(text: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::returning(text)
        }
    }

    pub fn live(&self) -> usize {
        self.live_sessions.load(Ordering::SeqCst)
    }
}

impl RecognitionEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn start(
        &self,
        language: &str,
        params: &EngineParameterSet,
    ) -> Result<Box<dyn EngineSession>> {
        self.started
            .lock()
            .unwrap()
            .push((language.to_string(), params.clone()));
        self.live_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            engine: self.clone(),
        }))
    }
}

struct FakeSession {
    engine: FakeEngine,
}

impl EngineSession for FakeSession {
    fn recognize(&mut self, _image: &[u8]) -> Result<RawRecognition> {
        if let Some(delay) = self.engine.delay {
            std::thread::sleep(delay);
        }
        if self.engine.panic_recognize {
            panic!("engine crashed mid-page");
        }
        if self.engine.fail_recognize {
            return Err(ScanError::EngineFailure("image is unreadable".to_string()));
        }
        Ok(RawRecognition {
            text: self.engine.text.clone(),
            confidence: 91.0,
            lines: Some(self.engine.text.lines().count()),
        })
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.engine.live_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}
