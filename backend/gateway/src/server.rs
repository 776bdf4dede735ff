//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use wayfarer_agent::TravelAssistant;
use wayfarer_core::ToolRegistry;

use crate::{health_api, messages_api, sessions_api, tools_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub assistant: Arc<TravelAssistant>,
    /// Mock data tools, invocable directly.
    pub tools: ToolRegistry,
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(assistant: Arc<TravelAssistant>, tools: ToolRegistry) -> Self {
        Self {
            assistant,
            tools,
            started_at: Instant::now(),
        }
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/health", get(health_api::get_health))
        .route("/api/personas", get(sessions_api::list_personas))
        .route("/api/sessions", post(sessions_api::create_session))
        .route(
            "/api/sessions/:id",
            get(sessions_api::get_session).delete(sessions_api::delete_session),
        )
        .route("/api/sessions/:id/messages", post(messages_api::post_message))
        .route("/api/tools", get(tools_api::list_tools))
        .route("/api/tools/:name", post(tools_api::invoke_tool))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the Axum HTTP server for the gateway.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway HTTP server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
