//! `wayfarer status`: health check against a running gateway.

use anyhow::Result;
use wayfarer_config::WayfarerConfig;

use crate::terminal_output::{note_success, note_warn};

/// Health URL for the configured listener. Wildcard binds are reached on loopback.
pub fn health_url(config: &WayfarerConfig) -> String {
    let host = match config.bind() {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        other => other,
    };
    format!("http://{}:{}/api/health", host, config.port())
}

pub async fn run(config: &WayfarerConfig) -> Result<()> {
    let url = health_url(config);
    let client = reqwest::Client::new();
    match client.get(&url).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            note_success(&format!("Wayfarer is running at {url}"));
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            note_warn(&format!("Wayfarer is not running at {url}"));
        }
    }
    Ok(())
}
