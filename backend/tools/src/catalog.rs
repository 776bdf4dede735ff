//! Static lookup tables behind the mock data providers.

pub const AIRLINES: &[&str] = &[
    "Emirates",
    "Qatar Airways",
    "Turkish Airlines",
    "Lufthansa",
    "British Airways",
    "Air France",
];

pub const FLIGHT_TIMES: &[&str] = &["06:00", "09:30", "14:15", "18:45", "22:30"];

pub const STOPS: &[&str] = &["Direct", "1 Stop", "2 Stops"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotelEntry {
    pub name: &'static str,
    pub rating: f32,
    pub price_range: &'static str,
}

const fn hotel(name: &'static str, rating: f32, price_range: &'static str) -> HotelEntry {
    HotelEntry {
        name,
        rating,
        price_range,
    }
}

pub const DEFAULT_BUDGET: &str = "mid-range";

pub const HOTELS: &[(&str, [HotelEntry; 3])] = &[
    (
        "budget",
        [
            hotel("Cozy Backpacker Inn", 4.1, "$30-60"),
            hotel("City Center Hostel", 4.3, "$25-45"),
            hotel("Traveler's Rest B&B", 4.2, "$40-70"),
        ],
    ),
    (
        "mid-range",
        [
            hotel("Grand Plaza Hotel", 4.5, "$80-150"),
            hotel("Heritage Boutique Hotel", 4.4, "$90-180"),
            hotel("Downtown Comfort Inn", 4.3, "$70-130"),
        ],
    ),
    (
        "luxury",
        [
            hotel("Royal Palace Resort", 4.8, "$250-500"),
            hotel("Five Star Grand Hotel", 4.9, "$300-600"),
            hotel("Exclusive Luxury Suites", 4.7, "$280-550"),
        ],
    ),
];

pub const AMENITIES: &[&str] = &[
    "Free WiFi",
    "Swimming Pool",
    "Fitness Center",
    "Spa",
    "Restaurant",
    "Room Service",
    "Business Center",
    "Airport Shuttle",
    "Parking",
    "Bar",
];

pub const DEFAULT_INTEREST: &str = "general";

pub const ATTRACTIONS: &[(&str, [&str; 6])] = &[
    (
        "historical",
        [
            "Ancient Castle Museum",
            "Historic Old Town",
            "Archaeological Site",
            "Heritage Monument",
            "Traditional Palace",
            "Cultural Heritage Center",
        ],
    ),
    (
        "adventure",
        [
            "Mountain Hiking Trail",
            "Zip Line Adventure",
            "Rock Climbing Center",
            "White Water Rafting",
            "Paragliding Point",
            "Adventure Sports Hub",
        ],
    ),
    (
        "cultural",
        [
            "Art Gallery District",
            "Local Markets",
            "Traditional Craft Center",
            "Cultural Performance Theater",
            "Music Festival Venue",
            "Folk Museum",
        ],
    ),
    (
        "nature",
        [
            "National Park",
            "Botanical Gardens",
            "Wildlife Sanctuary",
            "Scenic Viewpoint",
            "Nature Reserve",
            "Butterfly Garden",
        ],
    ),
    (
        "general",
        [
            "City Center Plaza",
            "Famous Landmark",
            "Shopping District",
            "Waterfront Promenade",
            "Observation Tower",
            "Central Park",
        ],
    ),
];

pub const FOOD_SUGGESTIONS: &[&str] = &[
    "Street Food Market",
    "Rooftop Restaurant",
    "Local Cuisine Tour",
    "Traditional Tea House",
    "Seafood Market",
    "Farm-to-Table Restaurant",
    "Food Truck Festival",
    "Cooking Class Experience",
];

/// Hotels for a budget tier; unknown tiers fall back to mid-range.
pub fn hotels_for(budget: &str) -> &'static [HotelEntry; 3] {
    lookup(HOTELS, budget, DEFAULT_BUDGET)
}

/// Attractions for an interest; unknown interests fall back to general.
pub fn attractions_for(interest: &str) -> &'static [&'static str; 6] {
    lookup(ATTRACTIONS, interest, DEFAULT_INTEREST)
}

fn lookup<T>(table: &'static [(&'static str, T)], key: &str, default: &str) -> &'static T {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| table.iter().find(|(k, _)| *k == default))
        .map(|(_, v)| v)
        .unwrap_or(&table[0].1)
}

/// Capitalize each word: "mid-range" → "Mid-Range".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
