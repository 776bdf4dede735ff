use wayfarer_core::{HandoffSignal, PersonaId};

/// Name of the function a persona calls to transfer control to `persona_name`,
/// e.g. `BookingAgent` → `transfer_to_booking_agent`.
pub fn handoff_tool_name(persona_name: &str) -> String {
    let mut snake = String::with_capacity(persona_name.len() + 4);
    for ch in persona_name.chars() {
        let separated = snake.is_empty() || snake.ends_with('_');
        if ch.is_uppercase() {
            if !separated {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() {
            snake.push(ch);
        } else if !separated {
            snake.push('_');
        }
    }
    format!("transfer_to_{}", snake.trim_end_matches('_'))
}

/// Picks the target persona for a hand-off signal.
///
/// Implementations only name a target; whether the move is allowed is the
/// router's job.
pub trait HandoffDecider: Send + Sync {
    fn decide(&self, from: PersonaId, signal: &HandoffSignal) -> Option<PersonaId>;
}

/// Default decider: resolves the signalled function name back to a persona.
///
/// Accepts the advertised `transfer_to_*` name as well as a bare agent name or
/// key, which some backends return instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalDecider;

impl HandoffDecider for SignalDecider {
    fn decide(&self, _from: PersonaId, signal: &HandoffSignal) -> Option<PersonaId> {
        let name = signal.tool_name.trim();
        PersonaId::ALL
            .into_iter()
            .find(|id| handoff_tool_name(id.agent_name()) == name)
            .or_else(|| PersonaId::from_name(name))
    }
}
