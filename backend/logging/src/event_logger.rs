//! Conversation Event Logger
//!
//! Structured events (message, hand-off, error) emitted through `tracing`
//! under the `conversation_events` target, which the JSON file layer writes
//! as NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

pub const EVENT_TARGET: &str = "conversation_events";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ConversationEvent {
    Message {
        agent: String,
        role: String,
        content: String,
    },
    Handoff {
        from: String,
        to: String,
    },
    Error {
        agent: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ConversationEvent,
}

impl EventLogEntry {
    /// Build a timestamped, redacted entry.
    pub fn new(session_id: &str, mut event: ConversationEvent) -> Self {
        match &mut event {
            ConversationEvent::Message { content, .. } => {
                *content = redact_sensitive_data(content);
            }
            ConversationEvent::Error { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            ConversationEvent::Handoff { .. } => {}
        }

        Self {
            session_id: session_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Logs a conversation event, redacting free text before it reaches any sink.
    pub fn log_event(session_id: &str, event: ConversationEvent) {
        let entry = EventLogEntry::new(session_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "conversation_events", session_id = %entry.session_id, event = %json, "Conversation event");
    }
}
