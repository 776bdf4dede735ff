/// Transition table: which persona may hand control to which.
///
/// Built from the hand-offs each persona declares. A persona with no declared
/// hand-offs has no successors, so specialists can never hand back.
use std::collections::{BTreeSet, HashMap};

use wayfarer_core::{Persona, PersonaId};

#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    edges: HashMap<PersonaId, BTreeSet<PersonaId>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_personas<'a, I>(personas: I) -> Self
    where
        I: IntoIterator<Item = &'a Persona>,
    {
        let mut table = Self::new();
        for persona in personas {
            for handoff in &persona.handoffs {
                table.allow(persona.id, handoff.target);
            }
        }
        table
    }

    /// Add an edge. Self-loops are ignored.
    pub fn allow(&mut self, from: PersonaId, to: PersonaId) {
        if from != to {
            self.edges.entry(from).or_default().insert(to);
        }
    }

    pub fn allows(&self, from: PersonaId, to: PersonaId) -> bool {
        self.edges.get(&from).is_some_and(|s| s.contains(&to))
    }

    /// Successors of `from`, in `PersonaId` order.
    pub fn successors(&self, from: PersonaId) -> Vec<PersonaId> {
        self.edges
            .get(&from)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }
}
