use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use crate::chat::ChatMessage;

/// A capability that a persona can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "get_flights").
    fn name(&self) -> &str;

    /// Description for the LLM prompt.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String, anyhow::Error>;
}

/// A hand-off target advertised to the backend as a callable function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffTool {
    pub name: String,
    pub description: String,
}

/// Out-of-band indicator that the active persona wants to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffSignal {
    /// Function name the backend called, e.g. `transfer_to_booking_agent`.
    pub tool_name: String,
}

impl HandoffSignal {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }
}

/// One item of an incremental backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment to forward to the user.
    Delta(String),
    Handoff(HandoffSignal),
}

/// Incremental backend response. Dropping it cancels the producer.
pub type LlmStream = BoxStream<'static, Result<StreamEvent>>;

/// Trait for backend model providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and return the whole response.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;

    /// Send a completion request and return the response as it is generated.
    ///
    /// Providers without native streaming get a single-fragment stream.
    async fn stream(&self, request: &LlmRequest) -> Result<LlmStream> {
        let response = self.complete(request).await?;
        let mut events = Vec::with_capacity(2);
        if !response.content.is_empty() {
            events.push(Ok(StreamEvent::Delta(response.content)));
        }
        if let Some(signal) = response.handoff {
            events.push(Ok(StreamEvent::Handoff(signal)));
        }
        Ok(stream::iter(events).boxed())
    }
}

/// Request to a backend provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    /// Persona instructions.
    pub system_prompt: String,
    /// Full conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub handoffs: Vec<HandoffTool>,
}

impl LlmRequest {
    /// Messages as sent on the wire: system prompt first, then history.
    pub fn wire_messages(&self) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        if !self.system_prompt.is_empty() {
            out.push(ChatMessage::system(self.system_prompt.clone()));
        }
        out.extend(self.messages.iter().cloned());
        out
    }
}

/// Response from a backend provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub handoff: Option<HandoffSignal>,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AtomicOnly;

    #[async_trait]
    impl LlmProvider for AtomicOnly {
        fn name(&self) -> &str {
            "atomic"
        }

        async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
            Ok(LlmResponse {
                content: "Let me connect you.".into(),
                handoff: Some(HandoffSignal::new("transfer_to_booking_agent")),
                provider: "atomic".into(),
                model: request.model.clone(),
                tokens_used: 4,
                latency_ms: 1,
            })
        }
    }

    fn request() -> LlmRequest {
        LlmRequest {
            model: "m".into(),
            system_prompt: "be nice".into(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 16,
            temperature: 0.0,
            handoffs: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_default_stream_wraps_complete() {
        let events: Vec<StreamEvent> = AtomicOnly
            .stream(&request())
            .await
            .unwrap()
            .map(|e| e.unwrap())
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Let me connect you.".into()),
                StreamEvent::Handoff(HandoffSignal::new("transfer_to_booking_agent")),
            ]
        );
    }

    #[test]
    fn test_wire_messages_prepend_system_prompt() {
        let wire = request().wire_messages();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0], ChatMessage::system("be nice"));
        assert_eq!(wire[1], ChatMessage::user("hi"));
    }
}
