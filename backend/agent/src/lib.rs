//! Wayfarer conversation runtime
//!
//! The persona registry, per-session state and store, the reply sink the
//! transports implement, and the message loop that ties them to the backend.

pub mod agent_loop;
pub mod personas;
pub mod reply;
pub mod session_state;
pub mod session_store;

pub use agent_loop::{TravelAssistant, TurnOutcome, WELCOME_MESSAGE, WORKING_MESSAGE};
pub use personas::{ModelSelection, PersonaRegistry};
pub use reply::{ChannelSink, CollectingSink, ReplyEvent, ReplySink};
pub use session_state::{HandoffRecord, SessionId, SessionSnapshot, SessionState};
pub use session_store::SessionStore;
