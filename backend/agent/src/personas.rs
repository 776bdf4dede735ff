//! The four travel personas and their model bindings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wayfarer_core::{Persona, PersonaId, RunConfig, Tool, ToolRegistry};

const ORCHESTRATOR_INSTRUCTIONS: &str = "\
You are the travel concierge who coordinates the whole trip plan. Work out what the \
traveller wants and steer the conversation from interests to destinations, then to \
bookings, then to things to do.
- If the traveller is unsure where to go, transfer to DestinationAgent.
- Once a destination is chosen, or when asked to book flights or hotels somewhere, \
transfer to BookingAgent.
- When asked what to see or do in a place, or after booking, transfer to ExploreAgent.
Before transferring, briefly tell the traveller what happens next. Ask a clarifying \
question when the goal is unclear. Keep a warm, professional tone.";

const DESTINATION_INSTRUCTIONS: &str = "\
You are an enthusiastic destination expert, a well-travelled friend with favourite \
places all over the world.
- Suggest 3 to 5 destinations that fit the traveller's mood, interests and budget.
- Describe each one vividly and say what makes it special.
- Add short practical notes: best season to visit and what to expect.
- If preferences are vague, ask a couple of friendly questions first.
End by inviting the traveller to pick a destination so planning can continue.";

const BOOKING_INSTRUCTIONS: &str = "\
You are a booking specialist acting as the traveller's personal travel agent.
- Use `get_flights` to find flights between the departure city and the destination.
- Use `suggest_hotels` to recommend stays that match the budget.
- Collect what you need: dates, departure city, budget and accommodation preferences.
- Present options clearly with prices and practical details, and offer alternatives.
- Share useful tips on booking timing and deals.
Walk the traveller through the booking step by step in a friendly, professional tone.";

const EXPLORE_INSTRUCTIONS: &str = "\
You are a local experience guide who knows the famous sights and the hidden gems.
- Use `get_attractions` to find attractions, activities and food experiences.
- Match suggestions to the traveller's interests and mix must-sees with lesser-known spots.
- Recommend local dishes and where the locals eat.
- Help shape a balanced itinerary and ask about interests to personalise further.
Keep the tone excited and knowledgeable, like a friend sharing their favourite places.";

/// Backend model per persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelection {
    pub orchestrator: String,
    pub destination: String,
    pub booking: String,
    pub explore: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            orchestrator: "mistralai/mistral-small-3.2-24b-instruct".to_string(),
            destination: "mistralai/mistral-small-3.2-24b-instruct:free".to_string(),
            booking: "google/gemini-2.5-pro-exp-03-25".to_string(),
            explore: "google/gemini-2.5-pro-exp-03-25".to_string(),
        }
    }
}

impl ModelSelection {
    pub fn for_persona(&self, id: PersonaId) -> &str {
        match id {
            PersonaId::Orchestrator => &self.orchestrator,
            PersonaId::Destination => &self.destination,
            PersonaId::Booking => &self.booking,
            PersonaId::Explore => &self.explore,
        }
    }
}

/// The persona set shared by every session. Built once per process.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    // Indexed by `PersonaId` discriminant.
    personas: [Arc<Persona>; 4],
}

impl PersonaRegistry {
    /// The travel assistant personas: an orchestrator that hands off to three
    /// specialists.
    pub fn travel(models: &ModelSelection, tracing_disabled: bool) -> Self {
        let run_config = |id: PersonaId| RunConfig {
            model: models.for_persona(id).to_string(),
            tracing_disabled,
            ..RunConfig::default()
        };

        let orchestrator = Persona::new(
            PersonaId::Orchestrator,
            ORCHESTRATOR_INSTRUCTIONS,
            run_config(PersonaId::Orchestrator),
        )
        .with_handoff(
            PersonaId::Destination,
            "Suggests destinations from the traveller's mood, interests and budget.",
        )
        .with_handoff(
            PersonaId::Booking,
            "Finds flights and hotels once a destination is chosen.",
        )
        .with_handoff(
            PersonaId::Explore,
            "Recommends attractions, activities and local food at a destination.",
        );

        let destination = Persona::new(
            PersonaId::Destination,
            DESTINATION_INSTRUCTIONS,
            run_config(PersonaId::Destination),
        );

        let booking = Persona::new(
            PersonaId::Booking,
            BOOKING_INSTRUCTIONS,
            run_config(PersonaId::Booking),
        )
        .with_tools(["get_flights", "suggest_hotels"]);

        let explore = Persona::new(
            PersonaId::Explore,
            EXPLORE_INSTRUCTIONS,
            run_config(PersonaId::Explore),
        )
        .with_tools(["get_attractions"]);

        Self {
            personas: [orchestrator, destination, booking, explore].map(Arc::new),
        }
    }

    /// Override generation limits on every persona.
    pub fn with_generation(mut self, max_tokens: u32, temperature: f32) -> Self {
        for persona in self.personas.iter_mut() {
            let persona = Arc::make_mut(persona);
            persona.run_config.max_tokens = max_tokens;
            persona.run_config.temperature = temperature;
        }
        self
    }

    /// Route every persona through the named provider.
    pub fn with_provider(mut self, provider: &str) -> Self {
        for persona in self.personas.iter_mut() {
            Arc::make_mut(persona).run_config.provider = provider.to_string();
        }
        self
    }

    pub fn get(&self, id: PersonaId) -> Arc<Persona> {
        Arc::clone(&self.personas[id as usize])
    }

    pub fn by_name(&self, name: &str) -> Option<Arc<Persona>> {
        PersonaId::from_name(name).map(|id| self.get(id))
    }

    /// The persona every session starts with.
    pub fn entry(&self) -> Arc<Persona> {
        self.get(PersonaId::Orchestrator)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Persona>> {
        self.personas.iter()
    }

    /// Declared tools of a persona that exist in `tools`, enabled or not.
    pub fn bound_tools(&self, id: PersonaId, tools: &ToolRegistry) -> Vec<Arc<dyn Tool>> {
        tools.resolve(&self.personas[id as usize].tools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_tools::travel_tools;

    fn registry() -> PersonaRegistry {
        PersonaRegistry::travel(&ModelSelection::default(), true)
    }

    #[test]
    fn test_registry_holds_four_personas_in_order() {
        let names: Vec<_> = registry().iter().map(|p| p.name.clone()).collect();
        assert_eq!(
            names,
            vec!["OrchestratorAgent", "DestinationAgent", "BookingAgent", "ExploreAgent"]
        );
        assert_eq!(registry().entry().id, PersonaId::Orchestrator);
    }

    #[test]
    fn test_default_models_bound() {
        let registry = registry();
        assert_eq!(
            registry.get(PersonaId::Destination).run_config.model,
            "mistralai/mistral-small-3.2-24b-instruct:free"
        );
        assert_eq!(
            registry.get(PersonaId::Booking).run_config.model,
            "google/gemini-2.5-pro-exp-03-25"
        );
        assert!(registry.get(PersonaId::Explore).run_config.tracing_disabled);
    }

    #[test]
    fn test_only_orchestrator_declares_handoffs() {
        let registry = registry();
        let orchestrator = registry.entry();
        assert_eq!(orchestrator.handoffs.len(), 3);
        for id in [PersonaId::Destination, PersonaId::Booking, PersonaId::Explore] {
            assert!(orchestrator.can_hand_off_to(id));
            assert!(registry.get(id).handoffs.is_empty());
        }
    }

    #[test]
    fn test_tool_bindings_declared_but_disabled() {
        let registry = registry();
        let tools = travel_tools();
        let booking: Vec<_> = registry
            .bound_tools(PersonaId::Booking, &tools)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(booking, vec!["get_flights", "suggest_hotels"]);
        assert_eq!(registry.bound_tools(PersonaId::Explore, &tools).len(), 1);
        assert!(registry.bound_tools(PersonaId::Destination, &tools).is_empty());
        assert!(registry.iter().all(|p| p.active_tools().is_empty()));
    }

    #[test]
    fn test_by_name_and_overrides() {
        let registry = registry().with_generation(512, 0.2).with_provider("mock");
        let explore = registry.by_name("ExploreAgent").unwrap();
        assert_eq!(explore.run_config.max_tokens, 512);
        assert_eq!(explore.run_config.provider, "mock");
        assert!(registry.by_name("PilotAgent").is_none());
    }
}
