//! Conversation-facing entry points into the hook registry.
//!
//! The session loop fires one call per lifecycle event: `session_start` on
//! create, `pre_message` before the backend sees a user message (may reject
//! or rewrite it), `handoff` after a persona switch is accepted,
//! `post_message` once a reply is committed, and `session_end` on delete.

use tracing::debug;

use crate::registry::HookRegistry;
use crate::types::{HandoffPayload, HookPayload, HookResult, MessagePayload, SessionPayload};

#[derive(Clone, Default)]
pub struct HookPipeline {
    pub registry: HookRegistry,
}

impl HookPipeline {
    pub fn new(registry: HookRegistry) -> Self {
        Self { registry }
    }

    async fn fire(&self, payload: HookPayload) -> HookResult {
        debug!(phase = ?payload.phase(), session_id = %payload.session_id(), "Firing hooks");
        self.registry.run(&payload).await
    }

    pub async fn pre_message(&self, payload: MessagePayload) -> HookResult {
        self.fire(HookPayload::PreMessage(payload)).await
    }

    pub async fn post_message(&self, payload: MessagePayload) -> HookResult {
        self.fire(HookPayload::PostMessage(payload)).await
    }

    pub async fn handoff(&self, payload: HandoffPayload) -> HookResult {
        self.fire(HookPayload::Handoff(payload)).await
    }

    pub async fn session_start(&self, payload: SessionPayload) -> HookResult {
        self.fire(HookPayload::SessionStart(payload)).await
    }

    pub async fn session_end(&self, payload: SessionPayload) -> HookResult {
        self.fire(HookPayload::SessionEnd(payload)).await
    }
}
