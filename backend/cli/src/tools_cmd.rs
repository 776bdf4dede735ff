//! Direct invocation of the mock data providers.

use clap::Subcommand;
use wayfarer_tools::catalog::{DEFAULT_BUDGET, DEFAULT_INTEREST};
use wayfarer_tools::hotels::DEFAULT_NIGHTS;
use wayfarer_tools::{get_attractions, get_flights, suggest_hotels};

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Mock flight options between two cities
    Flights {
        origin: String,
        destination: String,
        departure_date: String,
        #[arg(long)]
        return_date: Option<String>,
    },
    /// Mock hotel suggestions
    Hotels {
        destination: String,
        /// budget, mid-range or luxury
        #[arg(long, default_value = DEFAULT_BUDGET)]
        budget: String,
        #[arg(long, default_value_t = DEFAULT_NIGHTS)]
        nights: u32,
    },
    /// Mock attractions and food suggestions
    Attractions {
        destination: String,
        #[arg(long, default_value = DEFAULT_INTEREST)]
        interests: String,
    },
}

pub fn render(command: &ToolCommand) -> String {
    match command {
        ToolCommand::Flights {
            origin,
            destination,
            departure_date,
            return_date,
        } => get_flights(origin, destination, departure_date, return_date.as_deref()),
        ToolCommand::Hotels {
            destination,
            budget,
            nights,
        } => suggest_hotels(destination, budget, *nights),
        ToolCommand::Attractions {
            destination,
            interests,
        } => get_attractions(destination, interests),
    }
}

pub fn run(command: ToolCommand) {
    println!("{}", render(&command));
}
