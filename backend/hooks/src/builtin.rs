/// Built-in hook implementations.
///
/// These are bundled hooks the assistant can enable from configuration.
/// Each hook is a concrete struct that implements the `Hook` trait.
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

use crate::registry::Hook;
use crate::types::{HookPayload, HookPhase, HookResult};

// ---------------------------------------------------------------------------
// Logging hook: logs every lifecycle event
// ---------------------------------------------------------------------------

pub struct LoggingHook {
    pub prefix: String,
}

impl LoggingHook {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

#[async_trait]
impl Hook for LoggingHook {
    fn name(&self) -> &str {
        "logging_hook"
    }

    async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        match payload {
            HookPayload::Handoff(p) => {
                info!(
                    session_id = %p.session_id,
                    from = %p.from_agent,
                    "[{}] Handing off to {}...", self.prefix, p.to_agent
                );
            }
            HookPayload::SessionEnd(p) => {
                info!(
                    session_id = %p.session_id,
                    history_len = p.history_len,
                    "[{}] Session ended", self.prefix
                );
            }
            other => {
                info!(
                    session_id = %other.session_id(),
                    "[{}] Hook fired: {:?}", self.prefix, other.phase()
                );
            }
        }
        Ok(HookResult::pass())
    }
}

// ---------------------------------------------------------------------------
// Counting hook: tallies firings per phase
// ---------------------------------------------------------------------------

/// Records how many times each phase fired. Useful for status output and tests.
#[derive(Default)]
pub struct CountingHook {
    counts: Mutex<HashMap<HookPhase, usize>>,
}

impl CountingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, phase: HookPhase) -> usize {
        self.counts
            .lock()
            .map(|c| c.get(&phase).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl Hook for CountingHook {
    fn name(&self) -> &str {
        "counting_hook"
    }

    async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        if let Ok(mut counts) = self.counts.lock() {
            *counts.entry(payload.phase()).or_insert(0) += 1;
        }
        Ok(HookResult::pass())
    }
}

// ---------------------------------------------------------------------------
// Content filter hook: rejects user messages matching a word list
// ---------------------------------------------------------------------------

pub struct ContentFilterHook {
    pub blocked_words: Vec<String>,
}

impl ContentFilterHook {
    pub fn new(blocked_words: Vec<String>) -> Self {
        Self {
            blocked_words: blocked_words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl Hook for ContentFilterHook {
    fn name(&self) -> &str {
        "content_filter_hook"
    }

    async fn run(&self, payload: &HookPayload) -> Result<HookResult> {
        let HookPayload::PreMessage(p) = payload else {
            return Ok(HookResult::pass());
        };

        let lower = p.content.to_lowercase();
        for word in &self.blocked_words {
            if lower.contains(word.as_str()) {
                return Ok(HookResult::abort(format!("Blocked word detected: {}", word)));
            }
        }
        Ok(HookResult::pass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HandoffPayload, MessagePayload};

    fn pre(content: &str) -> HookPayload {
        HookPayload::PreMessage(MessagePayload {
            session_id: "s".into(),
            agent: "OrchestratorAgent".into(),
            role: "user".into(),
            content: content.into(),
        })
    }

    #[tokio::test]
    async fn test_counting_hook_tallies_per_phase() {
        let hook = CountingHook::new();
        hook.run(&pre("a")).await.unwrap();
        hook.run(&pre("b")).await.unwrap();
        hook.run(&HookPayload::Handoff(HandoffPayload {
            session_id: "s".into(),
            from_agent: "OrchestratorAgent".into(),
            to_agent: "ExploreAgent".into(),
            tool_name: "transfer_to_explore_agent".into(),
        }))
        .await
        .unwrap();

        assert_eq!(hook.count(HookPhase::PreMessage), 2);
        assert_eq!(hook.count(HookPhase::Handoff), 1);
        assert_eq!(hook.count(HookPhase::PostMessage), 0);
    }

    #[tokio::test]
    async fn test_content_filter_is_case_insensitive() {
        let hook = ContentFilterHook::new(vec!["Spam".into()]);
        assert!(hook.run(&pre("buy SPAM now")).await.unwrap().abort);
        assert!(!hook.run(&pre("trip to Rome")).await.unwrap().abort);
    }

    #[tokio::test]
    async fn test_logging_hook_passes() {
        let hook = LoggingHook::new("test");
        assert!(!hook.run(&pre("hi")).await.unwrap().abort);
    }
}
