use crate::models::Action;

use super::NormalizedText;

/// Intent keywords, checked in this order; the first action with a keyword
/// present in the utterance wins.
const INTENT_KEYWORDS: &[(Action, &[&str])] = &[
    (Action::Weather, &["weather", "forecast", "temperature"]),
    (
        Action::Attractions,
        &["attractions", "attraction", "places", "sights", "sightseeing"],
    ),
    (Action::Hotel, &["hotel", "hotels", "stay", "room", "rooms"]),
    (Action::Flight, &["flight", "flights", "fly", "airline", "airlines"]),
];

pub fn is_keyword(word: &str) -> bool {
    INTENT_KEYWORDS
        .iter()
        .any(|(_, keywords)| keywords.contains(&word))
}

fn action_for(word: &str) -> Option<Action> {
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.contains(&word))
        .map(|(action, _)| *action)
}

/// The action named anywhere in the utterance.
pub fn detect_action(text: &NormalizedText) -> Option<Action> {
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| text.tokens().any(|token| keywords.contains(&token)))
        .map(|(action, _)| *action)
}

/// The action when the whole utterance is a single intent keyword.
pub fn bare_action(text: &NormalizedText) -> Option<Action> {
    text.single_token().and_then(action_for)
}
