//! Wires configuration into a ready-to-serve assistant.

use std::sync::Arc;

use tracing::info;
use wayfarer_agent::{ModelSelection, PersonaRegistry, TravelAssistant};
use wayfarer_config::WayfarerConfig;
use wayfarer_core::PersonaId;
use wayfarer_hooks::{ContentFilterHook, HookPhase, HookPipeline, HookRegistry, LoggingHook};
use wayfarer_planner::{OpenRouterProvider, ProviderRegistry};

pub const PROVIDER_NAME: &str = "openrouter";

const ALL_PHASES: [HookPhase; 5] = [
    HookPhase::SessionStart,
    HookPhase::SessionEnd,
    HookPhase::PreMessage,
    HookPhase::PostMessage,
    HookPhase::Handoff,
];

/// Default models with any per-persona overrides from config applied.
pub fn model_selection(config: &WayfarerConfig) -> ModelSelection {
    let mut models = ModelSelection::default();
    for id in PersonaId::ALL {
        if let Some(model) = config.model_for(id.key()) {
            let slot = match id {
                PersonaId::Orchestrator => &mut models.orchestrator,
                PersonaId::Destination => &mut models.destination,
                PersonaId::Booking => &mut models.booking,
                PersonaId::Explore => &mut models.explore,
            };
            *slot = model.to_string();
        }
    }
    models
}

pub fn persona_registry(config: &WayfarerConfig) -> PersonaRegistry {
    PersonaRegistry::travel(&model_selection(config), config.tracing_disabled())
        .with_generation(config.max_tokens(), config.temperature())
}

pub async fn hook_pipeline(config: &WayfarerConfig) -> HookPipeline {
    let registry = HookRegistry::new();
    if config.log_hook_events() {
        registry
            .register_all(&ALL_PHASES, Arc::new(LoggingHook::new("wayfarer")))
            .await;
    }
    let blocked = config.blocked_words();
    if !blocked.is_empty() {
        registry
            .register(
                HookPhase::PreMessage,
                Arc::new(ContentFilterHook::new(blocked.to_vec())),
            )
            .await;
    }
    HookPipeline::new(registry)
}

pub async fn build_assistant(config: &WayfarerConfig, api_key: &str) -> TravelAssistant {
    let mut providers = ProviderRegistry::new();
    providers.register(
        PROVIDER_NAME,
        Arc::new(OpenRouterProvider::new(api_key).with_base_url(config.base_url())),
    );
    info!(base_url = %config.base_url(), "Registered OpenRouter provider");

    TravelAssistant::new(Arc::new(persona_registry(config)), providers)
        .with_hooks(hook_pipeline(config).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_config::schema::{GenerationConfig, HooksConfig, ModelsConfig};

    fn config() -> WayfarerConfig {
        WayfarerConfig {
            models: Some(ModelsConfig {
                booking: Some("openai/gpt-4o-mini".into()),
                ..Default::default()
            }),
            generation: Some(GenerationConfig {
                max_tokens: Some(512),
                temperature: Some(0.2),
                tracing_disabled: Some(true),
            }),
            hooks: Some(HooksConfig {
                log_events: Some(false),
                blocked_words: vec!["casino".into()],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_model_override_applies_to_one_persona() {
        let models = model_selection(&config());
        assert_eq!(models.booking, "openai/gpt-4o-mini");
        assert_eq!(models.orchestrator, ModelSelection::default().orchestrator);
    }

    #[test]
    fn test_generation_settings_reach_personas() {
        let registry = persona_registry(&config());
        let booking = registry.get(PersonaId::Booking);
        assert_eq!(booking.run_config.model, "openai/gpt-4o-mini");
        assert_eq!(booking.run_config.max_tokens, 512);
        assert_eq!(booking.run_config.provider, PROVIDER_NAME);
    }

    #[tokio::test]
    async fn test_hooks_follow_config() {
        let pipeline = hook_pipeline(&config()).await;
        assert_eq!(pipeline.registry.count(HookPhase::PreMessage).await, 1);
        assert_eq!(pipeline.registry.count(HookPhase::Handoff).await, 0);

        let pipeline = hook_pipeline(&WayfarerConfig::default()).await;
        assert_eq!(pipeline.registry.count(HookPhase::Handoff).await, 1);
        assert_eq!(pipeline.registry.count(HookPhase::PreMessage).await, 1);
    }
}
