use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TravelOption;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Hotel,
    Flight,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Hotel => "hotel",
            BookingKind::Flight => "flight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hotel" => Some(BookingKind::Hotel),
            "flight" => Some(BookingKind::Flight),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookingKind::Hotel => "Hotel",
            BookingKind::Flight => "Flight",
        }
    }
}

/// A finalized booking. Built once by the finalizer and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub id: String,
    pub kind: BookingKind,
    pub city: String,
    pub option: TravelOption,
    pub user_name: String,
    pub date: NaiveDate,
}
