//! Telemetry and structured logging for Wayfarer.
//!
//! Handles log redaction, console and rolling JSON output, and the
//! conversation event log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ConversationEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LoggerHandle};
pub use redact::redact_sensitive_data;
