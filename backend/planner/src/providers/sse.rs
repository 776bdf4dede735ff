//! Server-sent events decoding for OpenAI-compatible chat completion streams.
//!
//! The body is a sequence of `data: {json}` lines terminated by `data: [DONE]`.
//! Network chunks may split a line (or a multi-byte character) anywhere, so
//! bytes are buffered until a full line is available.

use std::fmt::Display;

use anyhow::{anyhow, Context, Result};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use wayfarer_core::{HandoffSignal, StreamEvent};

const DONE_MARKER: &str = "[DONE]";

/// Splits raw bytes into SSE `data:` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes and return the payloads of every completed `data:` line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(&['\n', '\r'][..]);
            // Blank separators and `:` comments (keep-alives) carry no data.
            if let Some(payload) = line.strip_prefix("data:") {
                payloads.push(payload.trim_start().to_string());
            }
        }
        payloads
    }
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Option<Vec<StreamChoice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<Delta>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct FunctionDelta {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// What one `data:` payload contributed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub events: Vec<StreamEvent>,
    pub finished: bool,
}

/// Decode one `chat.completion.chunk` payload.
///
/// Tool-call argument fragments arrive without a name and are ignored; only
/// the first fragment of a call names the function.
pub fn parse_chunk(payload: &str) -> Result<ChunkOutcome> {
    let chunk: StreamChunk =
        serde_json::from_str(payload).with_context(|| format!("malformed chunk: {payload}"))?;

    if let Some(err) = chunk.error {
        return Err(anyhow!("backend reported an error mid-stream: {}", err.message));
    }

    let mut outcome = ChunkOutcome::default();
    let Some(choice) = chunk.choices.and_then(|c| c.into_iter().next()) else {
        return Ok(outcome);
    };

    if let Some(delta) = choice.delta {
        if let Some(content) = delta.content.filter(|c| !c.is_empty()) {
            outcome.events.push(StreamEvent::Delta(content));
        }
        for call in delta.tool_calls.unwrap_or_default() {
            if let Some(name) = call.function.and_then(|f| f.name).filter(|n| !n.is_empty()) {
                outcome.events.push(StreamEvent::Handoff(HandoffSignal::new(name)));
            }
        }
    }
    outcome.finished = choice.finish_reason.is_some();
    Ok(outcome)
}

/// Read an SSE byte stream and forward decoded events into `tx`.
///
/// Stops early when the receiver is dropped. A transport error, a malformed
/// chunk, or a body that ends before `[DONE]` without a finish reason is
/// forwarded as an `Err` item.
pub async fn forward_sse<S, B, E>(bytes: S, tx: mpsc::Sender<Result<StreamEvent>>)
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut bytes = std::pin::pin!(bytes);
    let mut decoder = SseDecoder::new();
    let mut finished = false;

    while let Some(chunk) = bytes.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = tx.send(Err(anyhow!("stream read failed: {e}"))).await;
                return;
            }
        };

        for payload in decoder.push(chunk.as_ref()) {
            if payload == DONE_MARKER {
                debug!("SSE stream complete");
                return;
            }
            match parse_chunk(&payload) {
                Ok(outcome) => {
                    finished |= outcome.finished;
                    for event in outcome.events {
                        if tx.send(Ok(event)).await.is_err() {
                            debug!("SSE consumer dropped; stopping");
                            return;
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            }
        }
    }

    if !finished {
        warn!("SSE stream ended before completion");
        let _ = tx
            .send(Err(anyhow!("stream ended before the response completed")))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tokio_stream::wrappers::ReceiverStream;

    fn delta(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": content}, "finish_reason": null}]})
        )
    }

    async fn collect(parts: Vec<std::result::Result<Vec<u8>, String>>) -> Vec<Result<StreamEvent>> {
        let (tx, rx) = mpsc::channel(16);
        forward_sse(stream::iter(parts), tx).await;
        ReceiverStream::new(rx).collect().await
    }

    #[test]
    fn test_decoder_handles_split_lines() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"a\"").is_empty());
        assert_eq!(decoder.push(b":1}\r\n\r\n"), vec!["{\"a\":1}".to_string()]);
        assert!(decoder.push(b": OPENROUTER PROCESSING\n\n").is_empty());
    }

    #[test]
    fn test_decoder_handles_split_multibyte_char() {
        let mut decoder = SseDecoder::new();
        let line = "data: ✈️\n".as_bytes();
        assert!(decoder.push(&line[..8]).is_empty());
        assert_eq!(decoder.push(&line[8..]), vec!["✈️".to_string()]);
    }

    #[test]
    fn test_parse_tool_call_as_handoff() {
        let payload = serde_json::json!({
            "choices": [{
                "delta": {
                    "content": null,
                    "tool_calls": [{"index": 0, "id": "call_1", "type": "function",
                        "function": {"name": "transfer_to_booking_agent", "arguments": ""}}]
                },
                "finish_reason": null
            }]
        })
        .to_string();
        let outcome = parse_chunk(&payload).unwrap();
        assert_eq!(
            outcome.events,
            vec![StreamEvent::Handoff(HandoffSignal::new("transfer_to_booking_agent"))]
        );
        assert!(!outcome.finished);
    }

    #[test]
    fn test_parse_error_chunk() {
        let err = parse_chunk(r#"{"error":{"message":"Provider returned error","code":502}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Provider returned error"));
    }

    #[tokio::test]
    async fn test_forward_sse_streams_until_done() {
        let body = format!("{}{}data: [DONE]\n\n", delta("Hello"), delta(" there"));
        let (a, b) = body.as_bytes().split_at(10);
        let events = collect(vec![Ok(a.to_vec()), Ok(b.to_vec())]).await;
        let texts: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
        assert_eq!(
            texts,
            vec![
                StreamEvent::Delta("Hello".into()),
                StreamEvent::Delta(" there".into())
            ]
        );
    }

    #[tokio::test]
    async fn test_forward_sse_reports_transport_error() {
        let events = collect(vec![
            Ok(delta("partial").into_bytes()),
            Err("connection reset".to_string()),
        ])
        .await;
        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert!(events[1]
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("connection reset"));
    }

    #[tokio::test]
    async fn test_forward_sse_truncated_body_is_error() {
        let events = collect(vec![Ok(delta("cut").into_bytes())]).await;
        assert!(events.last().unwrap().is_err());
    }
}
