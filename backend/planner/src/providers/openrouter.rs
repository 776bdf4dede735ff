use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use wayfarer_core::{
    HandoffSignal, HandoffTool, LlmProvider, LlmRequest, LlmResponse, LlmStream,
};

use super::sse::forward_sse;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Events buffered between the SSE reader task and the consumer.
const STREAM_BUFFER: usize = 64;

/// OpenRouter.ai LLM provider.
pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, request: &LlmRequest, stream: bool) -> Result<reqwest::Response> {
        let body = ChatRequest::from_request(request, stream);

        debug!(
            model = %request.model,
            messages = body.messages.len(),
            handoffs = request.handoffs.len(),
            stream,
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Title", "Wayfarer")
            .json(&body)
            .send()
            .await
            .context("OpenRouter HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouter returned {}: {}", status, error_body);
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

impl ChatRequest {
    fn from_request(request: &LlmRequest, stream: bool) -> Self {
        Self {
            model: request.model.clone(),
            messages: request
                .wire_messages()
                .into_iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str().to_string(),
                    content: Some(m.content),
                    tool_calls: None,
                })
                .collect(),
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            tools: request.handoffs.iter().map(handoff_tool_spec).collect(),
            stream,
        }
    }
}

/// Hand-offs are advertised as argument-less functions.
fn handoff_tool_spec(tool: &HandoffTool) -> Value {
    serde_json::json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": { "type": "object", "properties": {}, "required": [] }
        }
    })
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Serialize, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Serialize, Deserialize)]
struct FunctionCall {
    name: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();
        let response = self.send(request, false).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        let message = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .context("OpenRouter response contained no choices")?;

        let handoff = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|call| HandoffSignal::new(call.function.name));

        let tokens_used = chat_response
            .usage
            .and_then(|u| u.total_tokens)
            .unwrap_or(0);

        Ok(LlmResponse {
            content: message.content.unwrap_or_default(),
            handoff,
            provider: "openrouter".to_string(),
            model: request.model.clone(),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn stream(&self, request: &LlmRequest) -> Result<LlmStream> {
        let response = self.send(request, true).await?;

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(forward_sse(response.bytes_stream(), tx));

        Ok(ReceiverStream::new(rx).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use wayfarer_core::{ChatMessage as CoreMessage, StreamEvent};

    fn request() -> LlmRequest {
        LlmRequest {
            model: "mistralai/mistral-small-3.2-24b-instruct".into(),
            system_prompt: "You are a travel concierge.".into(),
            messages: vec![
                CoreMessage::user("I want a beach holiday"),
                CoreMessage::assistant("Lovely! Any budget?"),
            ],
            max_tokens: 512,
            temperature: 0.7,
            handoffs: vec![HandoffTool {
                name: "transfer_to_destination_agent".into(),
                description: "Suggests destinations".into(),
            }],
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ChatRequest::from_request(&request(), true)).unwrap();
        assert_eq!(body["model"], "mistralai/mistral-small-3.2-24b-instruct");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][2]["role"], "assistant");
        assert_eq!(
            body["tools"][0]["function"]["name"],
            "transfer_to_destination_agent"
        );
        assert!(body["messages"][1].get("tool_calls").is_none());
    }

    #[test]
    fn test_non_streaming_body_omits_stream_and_empty_tools() {
        let mut req = request();
        req.handoffs.clear();
        let body = serde_json::to_value(ChatRequest::from_request(&req, false)).unwrap();
        assert!(body.get("stream").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_response_with_tool_call_parses() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{"id": "c1", "type": "function",
                        "function": {"name": "transfer_to_explore_agent", "arguments": "{}"}}]
                }
            }],
            "usage": {"total_tokens": 42}
        });
        let parsed: ChatResponse = serde_json::from_value(raw).unwrap();
        let message = &parsed.choices[0].message;
        assert!(message.content.is_none());
        assert_eq!(
            message.tool_calls.as_ref().unwrap()[0].function.name,
            "transfer_to_explore_agent"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenRouterProvider::new("sk-or-test").with_base_url("http://localhost:9/v1/");
        assert_eq!(provider.base_url, "http://localhost:9/v1");
    }

    /// Accept one connection, capture the request, then write `parts` with a
    /// short pause between them so the client reads them as separate chunks.
    async fn serve_once(parts: Vec<String>) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            for part in parts {
                socket.write_all(part.as_bytes()).await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/api/v1"), server)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn unavailable_response() -> String {
        let body = r#"{"error":{"message":"upstream overloaded"}}"#;
        format!(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn http_chunk(data: &str) -> String {
        format!("{:x}\r\n{data}\r\n", data.len())
    }

    #[tokio::test]
    async fn test_complete_surfaces_http_status_and_body() {
        let (base_url, server) = serve_once(vec![unavailable_response()]).await;
        let provider = OpenRouterProvider::new("sk-or-test").with_base_url(base_url);

        let err = provider.complete(&request()).await.unwrap_err().to_string();
        assert!(err.contains("503"), "{err}");
        assert!(err.contains("upstream overloaded"), "{err}");

        let sent = server.await.unwrap().to_lowercase();
        assert!(sent.starts_with("post /api/v1/chat/completions"));
        assert!(sent.contains("authorization: bearer sk-or-test"));
    }

    #[tokio::test]
    async fn test_stream_rejected_before_first_event() {
        let (base_url, server) = serve_once(vec![unavailable_response()]).await;
        let provider = OpenRouterProvider::new("sk-or-test").with_base_url(base_url);

        let Err(err) = provider.stream(&request()).await else {
            panic!("a 503 must not produce a stream");
        };
        let err = err.to_string();
        assert!(err.contains("503"), "{err}");
        assert!(err.contains("upstream overloaded"), "{err}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_stream_yields_deltas_and_handoff_from_chunked_body() {
        let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\nconnection: close\r\n\r\n";
        let parts = vec![
            head.to_string(),
            http_chunk(": OPENROUTER PROCESSING\n\n"),
            http_chunk(r#"data: {"choices":[{"delta":{"content":"Hel"#),
            http_chunk(concat!(
                r#"lo"},"finish_reason":null}]}"#,
                "\n\n",
                r#"data: {"choices":[{"delta":{"content":" there"},"finish_reason":null}]}"#,
                "\n\n",
            )),
            http_chunk(concat!(
                r#"data: {"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"name":"transfer_to_booking_agent","arguments":""}}]},"finish_reason":null}]}"#,
                "\n\n",
                r#"data: {"choices":[{"delta":{},"finish_reason":"tool_calls"}]}"#,
                "\n\ndata: [DONE]\n\n",
            )),
            "0\r\n\r\n".to_string(),
        ];
        let (base_url, server) = serve_once(parts).await;
        let provider = OpenRouterProvider::new("sk-or-test").with_base_url(base_url);

        let events: Vec<StreamEvent> = provider
            .stream(&request())
            .await
            .unwrap()
            .map(|item| item.unwrap())
            .collect()
            .await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hello".into()),
                StreamEvent::Delta(" there".into()),
                StreamEvent::Handoff(HandoffSignal::new("transfer_to_booking_agent")),
            ]
        );
        let sent = server.await.unwrap();
        assert!(sent.contains(r#""stream":true"#));
    }
}
