/// Hook lifecycle phases.
///
/// Hooks fire at specific points of a conversation: when a session starts or
/// ends, around every message exchange, and on every persona hand-off.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hook phases
// ---------------------------------------------------------------------------

/// The lifecycle phase at which a hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    /// When a new conversation starts.
    SessionStart,
    /// When a conversation is torn down.
    SessionEnd,
    /// Before a user message is sent to the active persona.
    PreMessage,
    /// After the assistant reply has been committed to history.
    PostMessage,
    /// When control transfers from one persona to another.
    Handoff,
}

// ---------------------------------------------------------------------------
// Payload carried into each hook
// ---------------------------------------------------------------------------

/// Payload passed to Pre/Post message hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub session_id: String,
    /// Agent name of the persona handling the message.
    pub agent: String,
    pub role: String,
    pub content: String,
}

/// Payload for session start/end hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPayload {
    pub session_id: String,
    pub agent: String,
    /// True for SessionEnd; false for SessionStart.
    pub is_end: bool,
    /// Number of history entries at the time the session ended.
    pub history_len: usize,
}

/// Payload for the hand-off hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandoffPayload {
    pub session_id: String,
    pub from_agent: String,
    pub to_agent: String,
    /// Function name the backend used to request the hand-off.
    pub tool_name: String,
}

/// Union payload type passed to all hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum HookPayload {
    SessionStart(SessionPayload),
    SessionEnd(SessionPayload),
    PreMessage(MessagePayload),
    PostMessage(MessagePayload),
    Handoff(HandoffPayload),
}

impl HookPayload {
    pub fn phase(&self) -> HookPhase {
        match self {
            Self::SessionStart(_) => HookPhase::SessionStart,
            Self::SessionEnd(_) => HookPhase::SessionEnd,
            Self::PreMessage(_) => HookPhase::PreMessage,
            Self::PostMessage(_) => HookPhase::PostMessage,
            Self::Handoff(_) => HookPhase::Handoff,
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionStart(p) | Self::SessionEnd(p) => &p.session_id,
            Self::PreMessage(p) | Self::PostMessage(p) => &p.session_id,
            Self::Handoff(p) => &p.session_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Hook result
// ---------------------------------------------------------------------------

/// Result returned by a hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookResult {
    /// If set, replace the payload content (e.g. a rewritten user message).
    pub modified_content: Option<String>,
    /// If true, abort the pipeline (e.g. reject a message).
    pub abort: bool,
    /// Optional human-readable reason for abortion or modification.
    pub reason: Option<String>,
}

impl HookResult {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn abort(reason: impl Into<String>) -> Self {
        Self { abort: true, reason: Some(reason.into()), ..Default::default() }
    }

    pub fn transform(content: impl Into<String>) -> Self {
        Self { modified_content: Some(content.into()), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_phase_and_tag() {
        let payload = HookPayload::Handoff(HandoffPayload {
            session_id: "s1".into(),
            from_agent: "OrchestratorAgent".into(),
            to_agent: "BookingAgent".into(),
            tool_name: "transfer_to_booking_agent".into(),
        });
        assert_eq!(payload.phase(), HookPhase::Handoff);
        assert_eq!(payload.session_id(), "s1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["phase"], "handoff");
        assert_eq!(json["to_agent"], "BookingAgent");
    }

    #[test]
    fn test_result_constructors() {
        assert!(!HookResult::pass().abort);
        let aborted = HookResult::abort("blocked");
        assert!(aborted.abort);
        assert_eq!(aborted.reason.as_deref(), Some("blocked"));
        assert_eq!(HookResult::transform("x").modified_content.as_deref(), Some("x"));
    }
}
