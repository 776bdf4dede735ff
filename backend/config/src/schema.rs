//! Wayfarer runtime configuration schema.
//!
//! Every section is optional in the file; `defaults::apply_all_defaults`
//! fills what is missing and the accessors on `WayfarerConfig` read the result.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WayfarerConfig {
    /// Backend credentials and endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openrouter: Option<OpenRouterConfig>,

    /// HTTP gateway binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Backend model per persona
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelsConfig>,

    /// Generation limits shared by all personas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HooksConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orchestrator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explore: Option<String>,
}

impl ModelsConfig {
    /// Entries as `(persona key, model id)` pairs, in persona order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("orchestrator", self.orchestrator.as_deref()),
            ("destination", self.destination.as_deref()),
            ("booking", self.booking.as_deref()),
            ("explore", self.explore.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Keep backend-side tracing off for every persona.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing_disabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON logs; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Register the logging hook on every phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_events: Option<bool>,
    /// Words that get a user message rejected before it reaches the backend.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_words: Vec<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl WayfarerConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.openrouter
            .as_ref()
            .and_then(|o| o.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.openrouter
            .as_ref()
            .and_then(|o| o.base_url.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BASE_URL)
    }

    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(crate::defaults::DEFAULT_PORT)
    }

    /// `bind:port` for the gateway listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind(), self.port())
    }

    pub fn max_tokens(&self) -> u32 {
        self.generation
            .as_ref()
            .and_then(|g| g.max_tokens)
            .unwrap_or(crate::defaults::DEFAULT_MAX_TOKENS)
    }

    pub fn temperature(&self) -> f32 {
        self.generation
            .as_ref()
            .and_then(|g| g.temperature)
            .unwrap_or(crate::defaults::DEFAULT_TEMPERATURE)
    }

    pub fn tracing_disabled(&self) -> bool {
        self.generation
            .as_ref()
            .and_then(|g| g.tracing_disabled)
            .unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    /// Configured model for a persona key, if overridden.
    pub fn model_for(&self, persona_key: &str) -> Option<&str> {
        let models = self.models.as_ref()?;
        models
            .entries()
            .into_iter()
            .find(|(key, _)| *key == persona_key)
            .and_then(|(_, model)| model)
    }

    pub fn log_hook_events(&self) -> bool {
        self.hooks.as_ref().and_then(|h| h.log_events).unwrap_or(true)
    }

    pub fn blocked_words(&self) -> &[String] {
        self.hooks
            .as_ref()
            .map(|h| h.blocked_words.as_slice())
            .unwrap_or(&[])
    }
}
