use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use wayfarer_core::{
    HandoffSignal, LlmProvider, LlmRequest, LlmResponse, LlmStream, StreamEvent,
};

/// One step of a scripted backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Emit a text fragment.
    Text(String),
    /// Signal a hand-off by calling the named function.
    Handoff(String),
    /// Fail the stream at this point.
    Fail(String),
}

impl ScriptStep {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn handoff(tool_name: impl Into<String>) -> Self {
        Self::Handoff(tool_name.into())
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }
}

enum Script {
    Steps(Vec<ScriptStep>),
    /// The invocation itself fails before any output.
    Unavailable(String),
}

const FALLBACK_REPLY: &str = "Mock response";

/// A mock provider that replays queued scripts, one per invocation.
///
/// Once the queue is empty every call answers with a fixed reply. Requests
/// are recorded so tests can assert on what the loop sent.
pub struct ScriptedProvider {
    name: String,
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply made of the given steps.
    pub fn push_script(&self, steps: Vec<ScriptStep>) -> &Self {
        self.lock_scripts().push_back(Script::Steps(steps));
        self
    }

    /// Queue a reply that fails before streaming starts.
    pub fn push_unavailable(&self, message: impl Into<String>) -> &Self {
        self.lock_scripts()
            .push_back(Script::Unavailable(message.into()));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lock_scripts(&self) -> std::sync::MutexGuard<'_, VecDeque<Script>> {
        self.scripts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_steps(&self, request: &LlmRequest) -> Result<Vec<ScriptStep>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match self.lock_scripts().pop_front() {
            Some(Script::Steps(steps)) => Ok(steps),
            Some(Script::Unavailable(message)) => Err(anyhow!(message)),
            None => Ok(vec![ScriptStep::Text(FALLBACK_REPLY.to_string())]),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let mut content = String::new();
        let mut handoff = None;
        for step in self.next_steps(request)? {
            match step {
                ScriptStep::Text(text) => content.push_str(&text),
                ScriptStep::Handoff(name) => {
                    handoff.get_or_insert(HandoffSignal::new(name));
                }
                ScriptStep::Fail(message) => return Err(anyhow!(message)),
            }
        }
        Ok(LlmResponse {
            content,
            handoff,
            provider: self.name.clone(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }

    async fn stream(&self, request: &LlmRequest) -> Result<LlmStream> {
        let events: Vec<Result<StreamEvent>> = self
            .next_steps(request)?
            .into_iter()
            .map(|step| match step {
                ScriptStep::Text(text) => Ok(StreamEvent::Delta(text)),
                ScriptStep::Handoff(name) => Ok(StreamEvent::Handoff(HandoffSignal::new(name))),
                ScriptStep::Fail(message) => Err(anyhow!(message)),
            })
            .collect();
        Ok(stream::iter(events).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::ChatMessage;

    fn request() -> LlmRequest {
        LlmRequest {
            model: "mock-model".into(),
            system_prompt: String::new(),
            messages: vec![ChatMessage::user("hello")],
            max_tokens: 8,
            temperature: 0.0,
            handoffs: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_scripts_replay_in_order() {
        let provider = ScriptedProvider::new("mock");
        provider
            .push_script(vec![ScriptStep::text("one")])
            .push_script(vec![ScriptStep::text("t"), ScriptStep::text("wo")]);

        assert_eq!(provider.complete(&request()).await.unwrap().content, "one");
        assert_eq!(provider.complete(&request()).await.unwrap().content, "two");
        assert_eq!(
            provider.complete(&request()).await.unwrap().content,
            "Mock response"
        );
        assert_eq!(provider.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_stream_surfaces_failure_after_text() {
        let provider = ScriptedProvider::new("mock");
        provider.push_script(vec![ScriptStep::text("partial"), ScriptStep::fail("boom")]);

        let items: Vec<_> = provider.stream(&request()).await.unwrap().collect().await;
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1].as_ref().unwrap_err().to_string(), "boom");
    }

    #[tokio::test]
    async fn test_unavailable_fails_before_stream() {
        let provider = ScriptedProvider::new("mock");
        provider.push_unavailable("backend unavailable");
        assert!(provider.stream(&request()).await.is_err());
    }
}
