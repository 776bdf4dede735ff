//! Config validation: schema checks with user-friendly error messages.

use crate::schema::WayfarerConfig;
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &WayfarerConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_openrouter(config, &mut report);
    validate_server(config, &mut report);
    validate_models(config, &mut report);
    validate_generation(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_openrouter(config: &WayfarerConfig, report: &mut ValidationReport) {
    if config.api_key().is_none() {
        report.warn(
            "openrouter.api_key",
            "No API key configured; serve and chat will refuse to start",
        );
    }
    let url = config.base_url();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        report.error("openrouter.base_url", format!("'{url}' is not an http(s) URL"));
    }
}

fn validate_server(config: &WayfarerConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "port must be > 0");
        } else if port < 1024 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(bind) = &server.bind {
        if bind.trim().is_empty() {
            report.error("server.bind", "bind address cannot be empty");
        }
    }
}

fn validate_models(config: &WayfarerConfig, report: &mut ValidationReport) {
    let Some(models) = &config.models else { return };
    for (key, model) in models.entries() {
        if let Some(model) = model {
            if model.trim().is_empty() {
                report.error(format!("models.{key}"), "model id cannot be empty");
            } else if !model.contains('/') {
                report.warn(
                    format!("models.{key}"),
                    format!("'{model}' has no provider prefix (expected 'vendor/model')"),
                );
            }
        }
    }
}

fn validate_generation(config: &WayfarerConfig, report: &mut ValidationReport) {
    let Some(generation) = &config.generation else { return };
    if generation.max_tokens == Some(0) {
        report.error("generation.max_tokens", "max_tokens must be >= 1");
    }
    if let Some(t) = generation.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error("generation.temperature", format!("{t} is outside 0.0..=2.0"));
        }
    }
}

fn validate_logging(config: &WayfarerConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        // RUST_LOG-style directives ("wayfarer=debug") are passed through as-is.
        let simple = !level.contains('=') && !level.contains(',');
        if simple && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.warn("logging.level", format!("Unknown log level '{level}'"));
        }
    }
}
