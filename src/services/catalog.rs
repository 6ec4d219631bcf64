//! Synthetic hotel and flight offers plus canned attraction lists. Every
//! function here is a pure function of the city name, so the same city
//! always yields the same offers.

use crate::models::{FlightOption, HotelOption, TravelOption};

pub const HOTEL_OPTION_COUNT: usize = 3;
pub const FLIGHT_OPTION_COUNT: usize = 2;

const HOTEL_NAMES: &[&str] = &[
    "Grand Palace",
    "Riverside Inn",
    "Central Suites",
    "Heritage Residency",
    "Skyline Hotel",
    "Garden Retreat",
];

const AIRLINES: &[(&str, &str)] = &[
    ("IndiGo", "6E"),
    ("Air India", "AI"),
    ("Vistara", "UK"),
    ("Emirates", "EK"),
    ("Lufthansa", "LH"),
    ("Air France", "AF"),
];

const KNOWN_ATTRACTIONS: &[(&str, &[&str])] = &[
    (
        "paris",
        &["Eiffel Tower", "Louvre Museum", "Notre-Dame Cathedral", "Montmartre", "Arc de Triomphe"],
    ),
    (
        "delhi",
        &["Red Fort", "Qutub Minar", "India Gate", "Humayun's Tomb", "Lotus Temple"],
    ),
    (
        "hyderabad",
        &["Charminar", "Golconda Fort", "Hussain Sagar Lake", "Salar Jung Museum", "Ramoji Film City"],
    ),
    (
        "mumbai",
        &["Gateway of India", "Marine Drive", "Elephanta Caves", "Chhatrapati Shivaji Terminus", "Juhu Beach"],
    ),
    (
        "bangalore",
        &["Lalbagh Botanical Garden", "Bangalore Palace", "Cubbon Park", "Tipu Sultan's Summer Palace", "ISKCON Temple"],
    ),
    (
        "tokyo",
        &["Senso-ji Temple", "Tokyo Skytree", "Meiji Shrine", "Shibuya Crossing", "Ueno Park"],
    ),
    (
        "london",
        &["Tower of London", "British Museum", "Buckingham Palace", "London Eye", "Westminster Abbey"],
    ),
];

/// FNV-1a over the lower-cased city, used as the seed for all synthetic data.
fn city_seed(city: &str) -> u64 {
    city.trim()
        .to_lowercase()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn bits(seed: u64, shift: u32, modulo: u64) -> u64 {
    seed.rotate_right(shift) % modulo
}

pub fn list_hotels(city: &str) -> Vec<TravelOption> {
    let seed = city_seed(city);
    (0..HOTEL_OPTION_COUNT)
        .map(|i| {
            let shift = (i as u32) * 13;
            let name = HOTEL_NAMES[(seed as usize).wrapping_add(i) % HOTEL_NAMES.len()];
            TravelOption::Hotel(HotelOption {
                name: format!("{city} {name}"),
                price: 80 + bits(seed, shift, 220) as u32,
                rating: (35 + bits(seed, shift + 7, 15)) as f32 / 10.0,
            })
        })
        .collect()
}

pub fn list_flights(city: &str) -> Vec<TravelOption> {
    let seed = city_seed(city);
    (0..FLIGHT_OPTION_COUNT)
        .map(|i| {
            let shift = (i as u32) * 17;
            let (airline, code) = AIRLINES[(seed as usize).wrapping_add(i * 3) % AIRLINES.len()];
            // One morning and one evening departure.
            let hour = 6 + (i as u64) * 10 + bits(seed, shift, 5);
            let minute = bits(seed, shift + 5, 4) * 15;
            TravelOption::Flight(FlightOption {
                airline: airline.to_string(),
                flight_number: format!("{code}-{}", 100 + bits(seed, shift + 9, 900)),
                departure_time: format!("{hour:02}:{minute:02}"),
                price: 120 + bits(seed, shift + 3, 600) as u32,
            })
        })
        .collect()
}

/// Numbered attraction list used when the provider returns nothing.
pub fn canned_attractions(city: &str) -> Vec<String> {
    let key = city.trim().to_lowercase();
    let names: Vec<String> = match KNOWN_ATTRACTIONS.iter().find(|(c, _)| *c == key) {
        Some((_, places)) => places.iter().map(|p| p.to_string()).collect(),
        None => ["Old Town", "City Museum", "Central Park", "Main Market"]
            .iter()
            .map(|place| format!("{city} {place}"))
            .collect(),
    };
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect()
}
