//! Config redaction: produce safe-to-share config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::WayfarerConfig;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &["api_key", "apiKey", "token", "secret", "password"];

/// Redact a config value tree, masking secrets as `"sk-o***"`.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

/// Redacted JSON view of a typed config.
pub fn redact_config(config: &WayfarerConfig) -> Value {
    redact(&serde_json::to_value(config).unwrap_or(Value::Null))
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Keep a short prefix so the key type is still recognizable.
pub fn mask_secret(s: &str) -> String {
    if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String(mask_secret(s)),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OpenRouterConfig;
    use serde_json::json;

    #[test]
    fn redacts_api_key() {
        let config = WayfarerConfig {
            openrouter: Some(OpenRouterConfig {
                api_key: Some("sk-or-v1-abcdef123456".into()),
                base_url: Some("https://openrouter.ai/api/v1".into()),
            }),
            ..Default::default()
        };
        let redacted = redact_config(&config);
        assert_eq!(redacted["openrouter"]["api_key"], "sk-o***");
        assert_eq!(redacted["openrouter"]["base_url"], "https://openrouter.ai/api/v1");
    }

    #[test]
    fn short_secrets_fully_masked() {
        assert_eq!(mask_secret("abc"), "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" } });
        assert_eq!(redact(&v)["logging"]["level"], "debug");
    }
}
