//! Per-conversation state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wayfarer_core::{ChatMessage, Persona, PersonaId, RunConfig};

/// Opaque session identifier (a UUID v4 string for generated sessions).
pub type SessionId = String;

/// One accepted persona switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandoffRecord {
    pub from: PersonaId,
    pub to: PersonaId,
    pub at: DateTime<Utc>,
}

/// Active state of a conversation session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: SessionId,
    pub active_persona: PersonaId,
    /// Run configuration of the active persona.
    pub run_config: RunConfig,
    /// Committed user and assistant turns, oldest first.
    pub history: Vec<ChatMessage>,
    pub handoffs: Vec<HandoffRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(session_id: impl Into<SessionId>, entry: &Persona) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            active_persona: entry.id,
            run_config: entry.run_config.clone(),
            history: Vec::new(),
            handoffs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Make `persona` active and record the switch.
    pub fn switch_to(&mut self, persona: &Persona) {
        let now = Utc::now();
        self.handoffs.push(HandoffRecord {
            from: self.active_persona,
            to: persona.id,
            at: now,
        });
        self.active_persona = persona.id;
        self.run_config = persona.run_config.clone();
        self.updated_at = now;
    }

    /// Append one completed exchange.
    pub fn commit_turn(&mut self, user: ChatMessage, assistant: ChatMessage) {
        self.history.push(user);
        self.history.push(assistant);
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            active_agent: self.active_persona.agent_name().to_string(),
            model: self.run_config.model.clone(),
            history: self.history.clone(),
            handoffs: self.handoffs.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Read-only view of a session, as served by the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub active_agent: String,
    pub model: String,
    pub history: Vec<ChatMessage>,
    pub handoffs: Vec<HandoffRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
