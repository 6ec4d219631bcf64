use serde::{Deserialize, Serialize};

/// The coarse thing the user wants done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Hotel,
    Flight,
    Weather,
    Attractions,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Hotel => "hotel",
            Action::Flight => "flight",
            Action::Weather => "weather",
            Action::Attractions => "attractions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affirmation {
    Affirm,
    Deny,
    Neither,
}
