//! Transcript logger port
//!
//! Fire-and-forget structured events for the diagnostic conversation.
//! Logging must never fail a turn, so the operation is infallible from
//! the caller's point of view.

use serde_json::Value;

/// One loggable event in a diagnostic conversation
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    pub event_type: String,
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Sink for diagnostic conversation events
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op logger for contexts that don't record transcripts
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
