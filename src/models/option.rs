use serde::{Deserialize, Serialize};

use super::BookingKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelOption {
    pub name: String,
    pub price: u32,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightOption {
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub price: u32,
}

/// One bookable candidate produced by the option catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TravelOption {
    Hotel(HotelOption),
    Flight(FlightOption),
}

impl TravelOption {
    pub fn kind(&self) -> BookingKind {
        match self {
            TravelOption::Hotel(_) => BookingKind::Hotel,
            TravelOption::Flight(_) => BookingKind::Flight,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TravelOption::Hotel(h) => {
                format!("{} - ${}/night, rated {:.1}", h.name, h.price, h.rating)
            }
            TravelOption::Flight(f) => format!(
                "{} {} departing {} - ${}",
                f.airline, f.flight_number, f.departure_time, f.price
            ),
        }
    }
}
