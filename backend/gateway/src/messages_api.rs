//! Message endpoint, streamed back as server-sent events.
//!
//! Each reply event becomes one SSE event named after its kind
//! (`working`, `fragment`, `handoff`, `committed`, `error`) with the event
//! serialized as JSON in the data field.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};
use wayfarer_agent::{ChannelSink, ReplyEvent, ReplySink};

use crate::server::GatewayState;
use crate::sessions_api::error_response;

/// Events buffered between the turn and the HTTP response.
const REPLY_BUFFER: usize = 64;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// Handler for `POST /api/sessions/:id/messages`
pub async fn post_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Response {
    if !state.assistant.sessions().contains(&id).await {
        return error_response(StatusCode::NOT_FOUND, format!("Session not found: {id}"));
    }

    info!(session_id = %id, "Incoming message");
    let (sink, rx) = ChannelSink::channel(REPLY_BUFFER);
    let assistant = state.assistant.clone();

    // The turn runs to completion even if the client disconnects.
    tokio::spawn(async move {
        if let Err(err) = assistant.handle_message(&id, &request.content, &sink).await {
            error!(session_id = %id, error = %err, "Message handling failed");
            sink.send(ReplyEvent::Error(format!("❌ Error: {err}"))).await;
        }
    });

    let stream = ReceiverStream::new(rx)
        .map(|event| Event::default().event(event.kind()).json_data(&event));

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
