pub mod decider;
pub mod router;
pub mod table;

pub use decider::{handoff_tool_name, HandoffDecider, SignalDecider};
pub use router::{HandoffRouter, RouteDecision, Transition};
pub use table::TransitionTable;
