//! `wayfarer personas`: the persona set as configured.

use wayfarer_agent::PersonaRegistry;
use wayfarer_config::WayfarerConfig;

use crate::app::persona_registry;
use crate::terminal_output::render_table;

pub fn persona_rows(registry: &PersonaRegistry) -> Vec<Vec<String>> {
    registry
        .iter()
        .map(|p| {
            let handoffs: Vec<&str> = p.handoffs.iter().map(|h| h.target.agent_name()).collect();
            vec![
                p.name.clone(),
                p.run_config.model.clone(),
                or_dash(handoffs.join(", ")),
                or_dash(p.tools.join(", ")),
            ]
        })
        .collect()
}

fn or_dash(s: String) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}

pub fn run(config: &WayfarerConfig) {
    let registry = persona_registry(config);
    println!(
        "\n{}",
        render_table(&["Persona", "Model", "Hands off to", "Tools"], &persona_rows(&registry))
    );
}
