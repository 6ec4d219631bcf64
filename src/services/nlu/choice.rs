use std::sync::OnceLock;

use regex::Regex;

use super::NormalizedText;

const CHOICE_WORDS: &[(&str, usize)] = &[
    ("one", 1),
    ("first", 1),
    ("1st", 1),
    ("two", 2),
    ("second", 2),
    ("2nd", 2),
    ("three", 3),
    ("third", 3),
    ("3rd", 3),
    ("four", 4),
    ("fourth", 4),
    ("4th", 4),
    ("five", 5),
    ("fifth", 5),
    ("5th", 5),
];

fn prefixed_choice() -> Option<&'static Regex> {
    static PREFIXED: OnceLock<Option<Regex>> = OnceLock::new();
    PREFIXED
        .get_or_init(|| Regex::new(r"\b(?:option|number|choice|pick)\s+(\w+)").ok())
        .as_ref()
}

fn parse_choice_word(word: &str) -> Option<usize> {
    if let Ok(n) = word.parse::<usize>() {
        return (n >= 1).then_some(n);
    }
    CHOICE_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, n)| *n)
}

pub fn is_choice_word(word: &str) -> bool {
    CHOICE_WORDS.iter().any(|(w, _)| *w == word)
}

/// Extract a 1-based choice. "option N" / "number N" phrasing is preferred;
/// otherwise the first token that reads as a number or ordinal is used.
pub fn extract_choice(text: &NormalizedText) -> Option<usize> {
    let prefixed = prefixed_choice()
        .and_then(|re| re.captures(text.as_str()))
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_choice_word(m.as_str()));

    prefixed.or_else(|| text.tokens().find_map(parse_choice_word))
}
