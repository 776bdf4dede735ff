//! Shared types and traits for the Wayfarer travel assistant.
//!
//! Everything that more than one crate needs to agree on lives here: chat
//! messages, persona descriptors, run configuration, the backend provider
//! trait with its streaming types, the tool trait, and the error type.

pub mod chat;
pub mod error;
pub mod tools;
pub mod traits;
pub mod types;

pub use chat::{ChatMessage, Role};
pub use error::WayfarerError;
pub use tools::ToolRegistry;
pub use traits::{
    HandoffSignal, HandoffTool, LlmProvider, LlmRequest, LlmResponse, LlmStream, StreamEvent,
    Tool,
};
pub use types::{Handoff, Persona, PersonaId, RunConfig};
