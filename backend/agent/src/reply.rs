//! Reply events and the sinks that carry them to the user.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// What the user sees while a message is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ReplyEvent {
    /// Placeholder shown before any output arrives.
    Working(String),
    /// A piece of the reply, in generation order.
    Fragment(String),
    Handoff { from: String, to: String },
    /// The full reply, now part of the session history.
    Committed(String),
    Error(String),
}

impl ReplyEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Working(_) => "working",
            Self::Fragment(_) => "fragment",
            Self::Handoff { .. } => "handoff",
            Self::Committed(_) => "committed",
            Self::Error(_) => "error",
        }
    }
}

/// Transport-side consumer of reply events.
///
/// A sink whose consumer went away drops events silently; the turn still
/// completes and commits.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, event: ReplyEvent);
}

/// Forwards events into an mpsc channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<ReplyEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<ReplyEvent>) -> Self {
        Self { tx }
    }

    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ReplyEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl ReplySink for ChannelSink {
    async fn send(&self, event: ReplyEvent) {
        if self.tx.send(event).await.is_err() {
            debug!("reply receiver dropped");
        }
    }
}

/// Keeps every event in memory.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<ReplyEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<ReplyEvent> {
        self.events.lock().await.clone()
    }

    /// Concatenated fragment text.
    pub async fn fragments(&self) -> String {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ReplyEvent::Fragment(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ReplySink for CollectingSink {
    async fn send(&self, event: ReplyEvent) {
        self.events.lock().await.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(ReplyEvent::Fragment("Hi".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "fragment", "data": "Hi"}));

        let json = serde_json::to_value(ReplyEvent::Handoff {
            from: "OrchestratorAgent".into(),
            to: "BookingAgent".into(),
        })
        .unwrap();
        assert_eq!(json["data"]["to"], "BookingAgent");
    }

    #[tokio::test]
    async fn test_channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelSink::channel(1);
        drop(rx);
        sink.send(ReplyEvent::Working("...".into())).await;
    }

    #[tokio::test]
    async fn test_collecting_sink_joins_fragments() {
        let sink = CollectingSink::new();
        sink.send(ReplyEvent::Working("w".into())).await;
        sink.send(ReplyEvent::Fragment("Hel".into())).await;
        sink.send(ReplyEvent::Fragment("lo".into())).await;
        assert_eq!(sink.fragments().await, "Hello");
        assert_eq!(sink.events().await.len(), 3);
    }
}
