//! Mock travel data providers.
//!
//! Each provider is a plain function returning a formatted text block and is
//! also wrapped as a [`Tool`] so personas can declare it as a capability.
//! Outputs are intentionally non-deterministic; the `generate_*` functions take
//! an explicit RNG for reproducible checks.

pub mod attractions;
pub mod catalog;
pub mod flights;
pub mod hotels;

use std::sync::Arc;

use anyhow::anyhow;
use serde_json::Value;
use wayfarer_core::{Tool, ToolRegistry};

pub use attractions::{get_attractions, AttractionsTool};
pub use flights::{get_flights, FlightOption, FlightSearchTool};
pub use hotels::{suggest_hotels, HotelSuggestionTool};

/// Registry holding the three mock data tools.
pub fn travel_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    let tools: [Arc<dyn Tool>; 3] = [
        Arc::new(FlightSearchTool),
        Arc::new(HotelSuggestionTool),
        Arc::new(AttractionsTool),
    ];
    for tool in tools {
        registry.register(tool);
    }
    registry
}

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> anyhow::Result<&'a str> {
    args[key]
        .as_str()
        .ok_or_else(|| anyhow!("Missing '{}' argument", key))
}
