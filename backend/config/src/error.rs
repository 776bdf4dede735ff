use std::path::PathBuf;

use thiserror::Error;

use crate::env::MissingEnvVarError;
use crate::validation::ConfigValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No OpenRouter API key in the environment or the config file.
    #[error("OPENROUTER_API_KEY is not set (export it, add it to .env, or set openrouter.api_key)")]
    MissingCredential,

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config YAML at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    #[error("invalid value for {key}: {message}")]
    InvalidOverride { key: String, message: String },

    #[error("config conversion failed: {0}")]
    Convert(#[from] serde_json::Error),

    /// Validation found errors; warnings alone never produce this.
    #[error("invalid configuration: {}", list_errors(.0))]
    Invalid(Vec<ConfigValidationError>),
}

fn list_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.path, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
