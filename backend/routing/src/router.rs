/// Hand-off router: turns a backend hand-off signal into a persona transition.
///
/// The router is a finite-state machine over `PersonaId` with the transition
/// table as its edge set. Transitions are one-way and there is no terminal
/// state; a session with no signal simply stays put.
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use wayfarer_core::{HandoffSignal, HandoffTool, Persona, PersonaId};

use crate::decider::{handoff_tool_name, HandoffDecider, SignalDecider};
use crate::table::TransitionTable;

/// An accepted persona switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: PersonaId,
    pub to: PersonaId,
    /// Function name the backend used to request it.
    pub tool_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Transition(Transition),
    Rejected { reason: String },
}

#[derive(Clone)]
pub struct HandoffRouter {
    table: TransitionTable,
    decider: Arc<dyn HandoffDecider>,
}

impl HandoffRouter {
    pub fn new(table: TransitionTable) -> Self {
        Self::with_decider(table, Arc::new(SignalDecider))
    }

    pub fn with_decider(table: TransitionTable, decider: Arc<dyn HandoffDecider>) -> Self {
        Self { table, decider }
    }

    pub fn route(&self, from: PersonaId, signal: &HandoffSignal) -> RouteDecision {
        let Some(to) = self.decider.decide(from, signal) else {
            let reason = format!("unknown hand-off target '{}'", signal.tool_name);
            warn!(from = %from, tool = %signal.tool_name, "[Router] {}", reason);
            return RouteDecision::Rejected { reason };
        };

        if !self.table.allows(from, to) {
            let reason = format!("{from} may not hand off to {to}");
            warn!(from = %from, to = %to, "[Router] {}", reason);
            return RouteDecision::Rejected { reason };
        }

        info!(from = %from, to = %to, "[Router] transition accepted");
        RouteDecision::Transition(Transition {
            from,
            to,
            tool_name: signal.tool_name.clone(),
        })
    }

    /// Functions advertised to the backend for `persona`'s declared hand-offs.
    pub fn handoff_tools(&self, persona: &Persona) -> Vec<HandoffTool> {
        persona
            .handoffs
            .iter()
            .filter(|h| self.table.allows(persona.id, h.target))
            .map(|h| HandoffTool {
                name: handoff_tool_name(h.target.agent_name()),
                description: h.description.clone(),
            })
            .collect()
    }
}
