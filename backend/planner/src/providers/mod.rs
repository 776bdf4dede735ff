pub mod mock;
pub mod openrouter;
pub mod sse;

use std::collections::HashMap;
use std::sync::Arc;

use wayfarer_core::{LlmProvider, WayfarerError};

/// Registry of LLM providers, looked up by name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider by name.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Look up the provider a run configuration names.
    pub fn get(&self, name: &str) -> Result<Arc<dyn LlmProvider>, WayfarerError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| WayfarerError::ProviderNotRegistered(name.to_string()))
    }

    /// Get all registered provider names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::ScriptedProvider;

    #[test]
    fn test_registry_lookup() {
        let mut registry = ProviderRegistry::new();
        registry.register("mock", Arc::new(ScriptedProvider::new("mock")));

        assert!(registry.get("mock").is_ok());
        let err = registry.get("openrouter").err().unwrap();
        assert!(matches!(err, WayfarerError::ProviderNotRegistered(name) if name == "openrouter"));
        assert_eq!(registry.list(), vec!["mock".to_string()]);
    }
}
