use std::fmt::Write;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use wayfarer_core::Tool;

use crate::catalog::{AIRLINES, FLIGHT_TIMES, STOPS};
use crate::required_str;

/// Number of options every search returns.
pub const FLIGHT_OPTION_COUNT: usize = 3;
pub const MIN_PRICE_USD: u32 = 300;
pub const MAX_PRICE_USD: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightOption {
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price_usd: u32,
    pub duration: String,
    pub stops: String,
}

/// Synthesize a fresh set of flight options.
pub fn generate_flights<R: Rng + ?Sized>(rng: &mut R) -> Vec<FlightOption> {
    (0..FLIGHT_OPTION_COUNT)
        .map(|_| {
            let airline = pick(rng, AIRLINES);
            let prefix: String = airline
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .take(2)
                .collect::<String>()
                .to_uppercase();
            FlightOption {
                flight_number: format!("{}{}", prefix, rng.gen_range(100..=999)),
                airline: airline.to_string(),
                departure_time: pick(rng, FLIGHT_TIMES).to_string(),
                arrival_time: pick(rng, FLIGHT_TIMES).to_string(),
                price_usd: rng.gen_range(MIN_PRICE_USD..=MAX_PRICE_USD),
                duration: format!("{}h {}m", rng.gen_range(2..=15), rng.gen_range(0..=59)),
                stops: pick(rng, STOPS).to_string(),
            }
        })
        .collect()
}

/// Render flight options as the markdown block shown to users.
pub fn render_flights(
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
    flights: &[FlightOption],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✈️ **Flight Options: {origin} → {destination}**");
    let _ = writeln!(out, "📅 **Departure Date:** {departure_date}");
    if let Some(ret) = return_date {
        let _ = writeln!(out, "🔁 **Return Date:** {ret}");
    }
    out.push('\n');

    for (i, flight) in flights.iter().enumerate() {
        let _ = writeln!(out, "**Option {}:**", i + 1);
        let _ = writeln!(out, "• {} - {}", flight.airline, flight.flight_number);
        let _ = writeln!(
            out,
            "• {} from {} → {} to {}",
            flight.departure_time, origin, flight.arrival_time, destination
        );
        let _ = writeln!(out, "• Duration: {} ({})", flight.duration, flight.stops);
        let _ = writeln!(out, "• Price: ${}\n", flight.price_usd);
    }
    out
}

/// Flight options between two cities with mock data.
pub fn get_flights(
    origin: &str,
    destination: &str,
    departure_date: &str,
    return_date: Option<&str>,
) -> String {
    let flights = generate_flights(&mut rand::thread_rng());
    render_flights(origin, destination, departure_date, return_date, &flights)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub struct FlightSearchTool;

#[async_trait]
impl Tool for FlightSearchTool {
    fn name(&self) -> &str {
        "get_flights"
    }

    fn description(&self) -> &str {
        "Get flight options between two cities with mock data."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "origin": { "type": "string", "description": "Departure city" },
                "destination": { "type": "string", "description": "Arrival city" },
                "departure_date": { "type": "string", "description": "Outbound date" },
                "return_date": { "type": "string", "description": "Optional return date" }
            },
            "required": ["origin", "destination", "departure_date"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let origin = required_str(&args, "origin")?;
        let destination = required_str(&args, "destination")?;
        let departure_date = required_str(&args, "departure_date")?;
        let return_date = args["return_date"].as_str();
        Ok(get_flights(origin, destination, departure_date, return_date))
    }
}
