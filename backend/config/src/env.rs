//! Environment handling for config values.
//!
//! Two steps run after the YAML is parsed:
//! - `${VAR_NAME}` references in string values are substituted. Only
//!   uppercase `[A-Z_][A-Z0-9_]*` names are matched, and `$${VAR}` escapes to
//!   a literal `${VAR}`.
//! - Well-known environment variables override individual fields.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::schema::{LoggingConfig, OpenRouterConfig, ServerConfig, WayfarerConfig};

/// Matches `${VAR}` with an optional extra leading `$` (the escape form).
static ENV_VAR_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").ok());

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";
pub const BIND_VAR: &str = "WAYFARER_BIND";
pub const PORT_VAR: &str = "WAYFARER_PORT";
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";
pub const LOG_DIR_VAR: &str = "WAYFARER_LOG_DIR";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in a config value tree.
///
/// Only string leaves are processed. A referenced variable that is unset or
/// empty is an error naming the variable and the config path.
pub fn resolve_env_vars_with(
    value: &Value,
    env: &HashMap<String, String>,
) -> Result<Value, MissingEnvVarError> {
    substitute_value(value, env, "")
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    let Some(pattern) = ENV_VAR_PATTERN.as_ref() else {
        return Ok(s.to_string());
    };
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = pattern.replace_all(s, |caps: &Captures| {
        let whole = &caps[0];
        let var_name = &caps[1];
        if whole.starts_with("$$") {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(substituted.into_owned()),
    }
}

/// Apply well-known environment variables on top of the file config.
pub fn apply_env_overrides(
    mut config: WayfarerConfig,
    env: &HashMap<String, String>,
) -> Result<WayfarerConfig, ConfigError> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(key) = get(API_KEY_VAR) {
        config
            .openrouter
            .get_or_insert_with(OpenRouterConfig::default)
            .api_key = Some(key.to_string());
    }
    if let Some(url) = get(BASE_URL_VAR) {
        config
            .openrouter
            .get_or_insert_with(OpenRouterConfig::default)
            .base_url = Some(url.to_string());
    }
    if let Some(bind) = get(BIND_VAR) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind.to_string());
    }
    if let Some(port) = get(PORT_VAR) {
        let port = port.parse::<u16>().map_err(|e| ConfigError::InvalidOverride {
            key: PORT_VAR.to_string(),
            message: e.to_string(),
        })?;
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }
    if let Some(dir) = get(LOG_DIR_VAR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir.to_string());
    }
    Ok(config)
}
