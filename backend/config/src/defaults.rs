//! Config defaults: fills unset values after loading.

use crate::schema::{
    GenerationConfig, LoggingConfig, OpenRouterConfig, ServerConfig, WayfarerConfig,
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Model ids known to be misspelled in older configs, with their fix.
const MODEL_ID_FIXES: &[(&str, &str)] = &[(
    "google/gemini-2.5-pro-exp-03-25e",
    "google/gemini-2.5-pro-exp-03-25",
)];

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: WayfarerConfig) -> WayfarerConfig {
    let config = apply_openrouter_defaults(config);
    let config = apply_server_defaults(config);
    let config = apply_generation_defaults(config);
    let config = apply_logging_defaults(config);
    normalize_model_ids(config)
}

fn apply_openrouter_defaults(mut config: WayfarerConfig) -> WayfarerConfig {
    let openrouter = config.openrouter.get_or_insert_with(OpenRouterConfig::default);
    if openrouter.base_url.is_none() {
        openrouter.base_url = Some(DEFAULT_BASE_URL.to_string());
    }
    config
}

fn apply_server_defaults(mut config: WayfarerConfig) -> WayfarerConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if server.bind.is_none() {
        server.bind = Some(DEFAULT_BIND.to_string());
    }
    if server.port.is_none() {
        server.port = Some(DEFAULT_PORT);
    }
    config
}

fn apply_generation_defaults(mut config: WayfarerConfig) -> WayfarerConfig {
    let generation = config.generation.get_or_insert_with(GenerationConfig::default);
    if generation.max_tokens.is_none() {
        generation.max_tokens = Some(DEFAULT_MAX_TOKENS);
    }
    if generation.temperature.is_none() {
        generation.temperature = Some(DEFAULT_TEMPERATURE);
    }
    if generation.tracing_disabled.is_none() {
        generation.tracing_disabled = Some(true);
    }
    config
}

fn apply_logging_defaults(mut config: WayfarerConfig) -> WayfarerConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

fn normalize_model_ids(mut config: WayfarerConfig) -> WayfarerConfig {
    let Some(models) = config.models.as_mut() else {
        return config;
    };
    for slot in [
        &mut models.orchestrator,
        &mut models.destination,
        &mut models.booking,
        &mut models.explore,
    ] {
        if let Some(model) = slot.as_mut() {
            if let Some((_, fixed)) = MODEL_ID_FIXES.iter().find(|(bad, _)| *bad == model.as_str()) {
                tracing::warn!(from = %model, to = %fixed, "Correcting misspelled model id");
                *model = fixed.to_string();
            }
        }
    }
    config
}
