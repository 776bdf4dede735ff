use std::fmt::Write;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use wayfarer_core::Tool;

use crate::catalog::{hotels_for, title_case, HotelEntry, AMENITIES, DEFAULT_BUDGET};
use crate::required_str;

pub const DEFAULT_NIGHTS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct HotelSuggestion {
    pub hotel: HotelEntry,
    pub amenities: Vec<&'static str>,
}

/// Pick the hotels for a budget tier and sample 4 to 7 amenities for each.
pub fn generate_hotels<R: Rng + ?Sized>(rng: &mut R, budget: &str) -> Vec<HotelSuggestion> {
    hotels_for(budget)
        .iter()
        .map(|hotel| {
            let count = rng.gen_range(4..=7);
            HotelSuggestion {
                hotel: *hotel,
                amenities: AMENITIES.choose_multiple(rng, count).copied().collect(),
            }
        })
        .collect()
}

pub fn render_hotels(
    destination: &str,
    budget: &str,
    nights: u32,
    hotels: &[HotelSuggestion],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🏨 **Hotel Recommendations in {destination}**");
    let _ = writeln!(out, "💰 **Budget Category:** {}", title_case(budget));
    let _ = writeln!(out, "🛏️ **Stay Duration:** {nights} nights\n");

    for (i, suggestion) in hotels.iter().enumerate() {
        let hotel = &suggestion.hotel;
        let _ = writeln!(out, "**{}. {}**", i + 1, hotel.name);
        let _ = writeln!(out, "⭐ Rating: {}/5", hotel.rating);
        let _ = writeln!(out, "💵 Price: {}/night", hotel.price_range);
        let _ = writeln!(out, "🎯 Amenities: {}\n", suggestion.amenities.join(", "));
    }
    out
}

/// Suggest hotels in the destination with mock data.
pub fn suggest_hotels(destination: &str, budget: &str, nights: u32) -> String {
    let hotels = generate_hotels(&mut rand::thread_rng(), budget);
    render_hotels(destination, budget, nights, &hotels)
}

pub struct HotelSuggestionTool;

#[async_trait]
impl Tool for HotelSuggestionTool {
    fn name(&self) -> &str {
        "suggest_hotels"
    }

    fn description(&self) -> &str {
        "Suggest hotels in the destination with mock data."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "destination": { "type": "string" },
                "budget": {
                    "type": "string",
                    "description": "budget, mid-range or luxury",
                    "default": DEFAULT_BUDGET
                },
                "nights": { "type": "integer", "default": DEFAULT_NIGHTS }
            },
            "required": ["destination"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let destination = required_str(&args, "destination")?;
        let budget = args["budget"].as_str().unwrap_or(DEFAULT_BUDGET);
        let nights = args["nights"]
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_NIGHTS);
        Ok(suggest_hotels(destination, budget, nights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_unknown_budget_uses_mid_range_catalog() {
        let hotels = generate_hotels(&mut StdRng::seed_from_u64(3), "ultra");
        let names: Vec<_> = hotels.iter().map(|h| h.hotel.name).collect();
        assert_eq!(
            names,
            vec!["Grand Plaza Hotel", "Heritage Boutique Hotel", "Downtown Comfort Inn"]
        );

        let text = render_hotels("Bali", "ultra", 3, &hotels);
        assert!(text.contains("💰 **Budget Category:** Ultra"));
        assert!(text.contains("Grand Plaza Hotel"));
    }

    #[test]
    fn test_amenities_are_distinct_and_bounded() {
        for seed in 0..30 {
            for suggestion in generate_hotels(&mut StdRng::seed_from_u64(seed), "luxury") {
                let count = suggestion.amenities.len();
                assert!((4..=7).contains(&count));
                let unique: HashSet<_> = suggestion.amenities.iter().collect();
                assert_eq!(unique.len(), count);
            }
        }
    }

    #[tokio::test]
    async fn test_tool_defaults() {
        let text = HotelSuggestionTool
            .execute(serde_json::json!({"destination": "Lisbon"}))
            .await
            .unwrap();
        assert!(text.contains("🏨 **Hotel Recommendations in Lisbon**"));
        assert!(text.contains("Mid-Range"));
        assert!(text.contains("🛏️ **Stay Duration:** 3 nights"));
    }
}
