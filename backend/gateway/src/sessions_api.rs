//! Session and persona endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use wayfarer_core::WayfarerError;

use crate::server::GatewayState;

#[derive(Serialize)]
pub struct PersonaView {
    pub key: &'static str,
    pub name: String,
    pub model: String,
    pub tools: Vec<String>,
    pub handoffs: Vec<String>,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub active_agent: String,
    pub welcome: &'static str,
}

/// Optional body of `POST /api/sessions`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSession {
    pub session_id: Option<String>,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn not_found(err: WayfarerError) -> Response {
    match err {
        WayfarerError::SessionNotFound(id) => {
            error_response(StatusCode::NOT_FOUND, format!("Session not found: {id}"))
        }
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Handler for `GET /api/personas`
pub async fn list_personas(State(state): State<GatewayState>) -> Json<Vec<PersonaView>> {
    let personas = state
        .assistant
        .personas()
        .iter()
        .map(|p| PersonaView {
            key: p.id.key(),
            name: p.name.clone(),
            model: p.run_config.model.clone(),
            tools: p.tools.clone(),
            handoffs: p
                .handoffs
                .iter()
                .map(|h| h.target.agent_name().to_string())
                .collect(),
        })
        .collect();
    Json(personas)
}

/// Handler for `POST /api/sessions`
///
/// A caller-chosen `session_id` that is still live is refused with 409.
pub async fn create_session(
    State(state): State<GatewayState>,
    body: Option<Json<CreateSession>>,
) -> Response {
    let requested = body
        .and_then(|Json(body)| body.session_id)
        .filter(|id| !id.trim().is_empty());
    let started = match requested {
        Some(id) => state.assistant.start_session_with_id(id).await,
        None => state.assistant.start_session().await,
    };
    match started {
        Ok((session_id, welcome)) => {
            let created = SessionCreated {
                session_id,
                active_agent: state.assistant.personas().entry().name.clone(),
                welcome,
            };
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(err @ WayfarerError::SessionExists(_)) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Handler for `GET /api/sessions/:id`
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.assistant.snapshot(&id).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => not_found(err),
    }
}

/// Handler for `DELETE /api/sessions/:id`
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.assistant.end_session(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => not_found(err),
    }
}
