//! Wayfarer Gateway HTTP API Server
//!
//! REST endpoints for sessions, personas and mock data tools, plus an SSE
//! endpoint that streams a persona's reply as it is generated.

pub mod health_api;
pub mod messages_api;
pub mod server;
pub mod sessions_api;
pub mod tools_api;

pub use server::{build_router, start_server, GatewayState};
