use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one of the four travel personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaId {
    Orchestrator,
    Destination,
    Booking,
    Explore,
}

impl PersonaId {
    pub const ALL: [PersonaId; 4] = [
        PersonaId::Orchestrator,
        PersonaId::Destination,
        PersonaId::Booking,
        PersonaId::Explore,
    ];

    /// The unique agent name presented to the backend and to users.
    pub fn agent_name(&self) -> &'static str {
        match self {
            PersonaId::Orchestrator => "OrchestratorAgent",
            PersonaId::Destination => "DestinationAgent",
            PersonaId::Booking => "BookingAgent",
            PersonaId::Explore => "ExploreAgent",
        }
    }

    /// Resolve an agent name (`"BookingAgent"`) or a short key (`"booking"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_ascii_lowercase();
        PersonaId::ALL.into_iter().find(|id| {
            id.agent_name().eq_ignore_ascii_case(&needle) || id.key() == needle
        })
    }

    /// Short lowercase key used in config files and URLs.
    pub fn key(&self) -> &'static str {
        match self {
            PersonaId::Orchestrator => "orchestrator",
            PersonaId::Destination => "destination",
            PersonaId::Booking => "booking",
            PersonaId::Explore => "explore",
        }
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.agent_name())
    }
}

/// Backend model selection plus execution flags for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Provider name in the provider registry (e.g. "openrouter").
    pub provider: String,
    /// Model identifier requested from the provider.
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub tracing_disabled: bool,
}

impl RunConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            provider: "openrouter".to_string(),
            model: "mistralai/mistral-small-3.2-24b-instruct".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
            tracing_disabled: true,
        }
    }
}

/// A declared hand-off target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handoff {
    pub target: PersonaId,
    /// Shown to the backend so the persona can decide when to delegate.
    pub description: String,
}

/// A named behavior profile: instructions plus a bound backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    pub instructions: String,
    pub run_config: RunConfig,
    /// Names of mock data tools this persona is designed to call.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Tool bindings are declared but only offered to the backend when enabled.
    #[serde(default)]
    pub tools_enabled: bool,
    #[serde(default)]
    pub handoffs: Vec<Handoff>,
}

impl Persona {
    pub fn new(id: PersonaId, instructions: impl Into<String>, run_config: RunConfig) -> Self {
        Self {
            id,
            name: id.agent_name().to_string(),
            instructions: instructions.into(),
            run_config,
            tools: Vec::new(),
            tools_enabled: false,
            handoffs: Vec::new(),
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_handoff(mut self, target: PersonaId, description: impl Into<String>) -> Self {
        self.handoffs.push(Handoff {
            target,
            description: description.into(),
        });
        self
    }

    pub fn can_hand_off_to(&self, target: PersonaId) -> bool {
        self.handoffs.iter().any(|h| h.target == target)
    }

    /// Tools actually offered to the backend.
    pub fn active_tools(&self) -> &[String] {
        if self.tools_enabled {
            &self.tools
        } else {
            &[]
        }
    }
}
