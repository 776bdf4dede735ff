use std::fmt::Write;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use wayfarer_core::Tool;

use crate::catalog::{attractions_for, title_case, DEFAULT_INTEREST, FOOD_SUGGESTIONS};
use crate::required_str;

pub const ATTRACTION_COUNT: usize = 4;
pub const FOOD_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttractionPlan {
    pub attractions: Vec<&'static str>,
    pub food: Vec<&'static str>,
}

pub fn generate_attractions<R: Rng + ?Sized>(rng: &mut R, interests: &str) -> AttractionPlan {
    let pool = attractions_for(interests);
    AttractionPlan {
        attractions: pool
            .choose_multiple(rng, ATTRACTION_COUNT.min(pool.len()))
            .copied()
            .collect(),
        food: FOOD_SUGGESTIONS
            .choose_multiple(rng, FOOD_COUNT)
            .copied()
            .collect(),
    }
}

pub fn render_attractions(destination: &str, interests: &str, plan: &AttractionPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎯 **Top Attractions in {destination}**");
    let _ = writeln!(out, "📍 **Based on your interest:** {}\n", title_case(interests));

    out.push_str("**🏛️ Must-Visit Places:**\n");
    for (i, attraction) in plan.attractions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, attraction);
    }

    out.push_str("\n**🍽️ Food & Dining:**\n");
    for (i, food) in plan.food.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, food);
    }
    out
}

/// Tourist attractions and food experiences for an interest category.
pub fn get_attractions(destination: &str, interests: &str) -> String {
    let plan = generate_attractions(&mut rand::thread_rng(), interests);
    render_attractions(destination, interests, &plan)
}

pub struct AttractionsTool;

#[async_trait]
impl Tool for AttractionsTool {
    fn name(&self) -> &str {
        "get_attractions"
    }

    fn description(&self) -> &str {
        "Get tourist attractions and activities based on interests."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": { "type": "string" },
                "interests": {
                    "type": "string",
                    "description": "historical, adventure, cultural, nature or general",
                    "default": DEFAULT_INTEREST
                }
            },
            "required": ["destination"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let destination = required_str(&args, "destination")?;
        let interests = args["interests"].as_str().unwrap_or(DEFAULT_INTEREST);
        Ok(get_attractions(destination, interests))
    }
}
