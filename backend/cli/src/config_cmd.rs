//! `wayfarer config`: effective configuration with secrets masked.

use std::path::Path;

use anyhow::Result;
use wayfarer_config::{redact_config, validate, WayfarerConfig};

use crate::terminal_output::{note_info, note_success, note_warn};

pub fn run(config: &WayfarerConfig, path: &Path) -> Result<()> {
    note_info(&format!("Config file: {}", path.display()));
    println!("{}", serde_json::to_string_pretty(&redact_config(config))?);

    // Loading already refused a config with validation errors.
    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    note_success("Configuration is valid");
    Ok(())
}
