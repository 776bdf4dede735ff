//! `wayfarer-config`: Wayfarer runtime configuration management.
//!
//! Provides:
//! - Typed config schema (backend, server, per-persona models, generation, logging, hooks)
//! - YAML loading from `~/.wayfarer/config.yaml`
//! - `${ENV_VAR}` substitution and environment overrides
//! - Default value application
//! - Validation and redaction for safe display

pub mod defaults;
pub mod env;
pub mod error;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use error::ConfigError;
pub use io::{config_dir, config_file_path};
pub use redact::{redact, redact_config};
pub use schema::WayfarerConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime. Warnings are
/// logged; any validation error fails with `ConfigError::Invalid`.
pub async fn load_and_prepare(path: &Path) -> Result<WayfarerConfig, ConfigError> {
    load_and_prepare_with(path, &env::process_env()).await
}

/// `load_and_prepare` against an explicit environment map.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<WayfarerConfig, ConfigError> {
    let raw = io::load_raw(path).await?;
    let value = resolve_env_vars_with(&raw, env)?;
    let config: WayfarerConfig = serde_json::from_value(value)?;
    let config = apply_env_overrides(config, env)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        return Err(ConfigError::Invalid(report.errors));
    }

    Ok(config)
}

impl WayfarerConfig {
    /// The backend API key, or `ConfigError::MissingCredential`.
    pub fn require_credential(&self) -> Result<&str, ConfigError> {
        self.api_key().ok_or(ConfigError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    async fn write_temp(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("wayfarer-lib-{}-{name}", std::process::id()));
        tokio::fs::write(&path, body).await.unwrap();
        path
    }

    #[tokio::test]
    async fn missing_credential_is_config_error() {
        let config = load_and_prepare_with(Path::new("/nonexistent/config.yaml"), &env(&[]))
            .await
            .unwrap();
        assert!(matches!(
            config.require_credential(),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[tokio::test]
    async fn credential_from_file_reference() {
        let path = write_temp(
            "ref.yaml",
            "openrouter:\n  api_key: ${MY_OR_KEY}\nmodels:\n  explore: meta-llama/llama-3.1-8b\n",
        )
        .await;
        let config = load_and_prepare_with(&path, &env(&[("MY_OR_KEY", "sk-or-file")]))
            .await
            .unwrap();
        assert_eq!(config.require_credential().unwrap(), "sk-or-file");
        assert_eq!(config.model_for("explore"), Some("meta-llama/llama-3.1-8b"));
        assert_eq!(config.port(), 8000);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn unset_reference_fails_loading() {
        let path = write_temp("unset.yaml", "openrouter:\n  api_key: ${NOT_SET_ANYWHERE}\n").await;
        let err = load_and_prepare_with(&path, &env(&[])).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref e) if e.var_name == "NOT_SET_ANYWHERE"));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn validation_errors_fail_loading() {
        let path = write_temp(
            "invalid.yaml",
            "openrouter:\n  api_key: sk-or-x\nmodels:\n  booking: \"\"\ngeneration:\n  max_tokens: 0\nserver:\n  port: 0\n",
        )
        .await;
        let err = load_and_prepare_with(&path, &env(&[])).await.unwrap_err();
        let _ = tokio::fs::remove_file(&path).await;

        let ConfigError::Invalid(errors) = &err else {
            panic!("expected Invalid, got {err:?}");
        };
        let mut paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, ["generation.max_tokens", "models.booking", "server.port"]);
        assert!(err.to_string().contains("server.port (port must be > 0)"));
    }

    #[tokio::test]
    async fn warnings_alone_still_load() {
        let path = write_temp("warn.yaml", "models:\n  explore: llama-3\n").await;
        let config = load_and_prepare_with(&path, &env(&[])).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;
        assert_eq!(config.model_for("explore"), Some("llama-3"));
    }
}
