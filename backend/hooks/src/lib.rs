pub mod builtin;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use builtin::{ContentFilterHook, CountingHook, LoggingHook};
pub use pipeline::HookPipeline;
pub use registry::{Hook, HookRegistry};
pub use types::{HandoffPayload, HookPayload, HookPhase, HookResult, MessagePayload, SessionPayload};
