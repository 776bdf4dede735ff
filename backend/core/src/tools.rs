use std::collections::BTreeMap;
use std::sync::Arc;

use crate::traits::Tool;

/// Name-indexed set of tools, listed in name order.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Resolve the given names, skipping unknown ones.
    pub fn resolve(&self, names: &[String]) -> Vec<Arc<dyn Tool>> {
        names.iter().filter_map(|name| self.get(name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echo the input"
        }
        fn parameters(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(args.to_string())
        }
    }

    #[test]
    fn test_resolve_skips_unknown() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        let found = registry.resolve(&["echo".into(), "missing".into()]);
        assert_eq!(found.len(), 1);
        assert_eq!(registry.list(), vec!["echo".to_string()]);
    }
}
