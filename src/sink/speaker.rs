//! Voice output for feedback cues.
//!
//! [`Speaker`] is object-safe and `Send + Sync` so the session runner can hold
//! it as `Arc<dyn Speaker>`.  Text is spoken verbatim; rate limiting is the
//! debouncer's job, never the speaker's.

// ---------------------------------------------------------------------------
// Speaker trait
// ---------------------------------------------------------------------------

pub trait Speaker: Send + Sync {
    /// Vocalize `text` exactly as given.
    fn speak(&self, text: &str);
}

// Compile-time assertion: Box<dyn Speaker> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Speaker>) {}
};

// ---------------------------------------------------------------------------
// LogSpeaker
// ---------------------------------------------------------------------------

/// Writes every cue to the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str) {
        log::info!("coach: {text}");
    }
}

// ---------------------------------------------------------------------------
// RecordingSpeaker  (test-only)
// ---------------------------------------------------------------------------

/// Keeps every spoken line so tests can assert on them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    spoken: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}
