//! Backend model invocation for Wayfarer.
//!
//! Providers implement [`wayfarer_core::LlmProvider`]; the session loop looks
//! them up by the name in a persona's run configuration.

pub mod providers;

pub use providers::mock::{ScriptStep, ScriptedProvider};
pub use providers::openrouter::OpenRouterProvider;
pub use providers::ProviderRegistry;
