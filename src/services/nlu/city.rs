use std::sync::OnceLock;

use regex::Regex;

use super::{title_case, NormalizedText};

/// Words that may introduce or follow the subject of a request.
const KEYWORD_ALTERNATION: &str =
    "hotels?|flights?|weather|forecast|attractions?|places|sights|book|booking|stay|fly";

/// Ordered city patterns; first pattern with a usable capture wins. `{kw}`
/// expands to the keyword alternation. Captures are at most two words so
/// that trailing clauses ("for two nights") are not swallowed.
const CITY_PATTERNS: &[(&str, &str)] = &[
    ("keyword_to", r"\b(?:{kw})\b.*?\bto ([a-z]+(?: [a-z]+)?)"),
    ("keyword_in", r"\b(?:{kw})\b.*?\b(?:in|at|for) ([a-z]+(?: [a-z]+)?)"),
    ("keyword_from", r"\b(?:{kw})\b.*?\bfrom ([a-z]+(?: [a-z]+)?)"),
    ("preposition_keyword", r"\b(?:in|at|to|for|from) ([a-z]+(?: [a-z]+)?) (?:{kw})\b"),
    ("two_words_keyword", r"\b([a-z]+ [a-z]+) (?:{kw})$"),
    ("word_keyword", r"\b([a-z]+) (?:{kw})$"),
    ("preposition", r"\b(?:in|at|to|for|from) ([a-z]+(?: [a-z]+)?)"),
];

const ARTICLES: &[&str] = &["a", "an", "the"];

/// Words that end a captured city phrase ("paris please", "tokyo today").
const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "i", "me", "my", "we", "us", "our", "you", "your", "it", "this", "that",
    "some", "any", "please", "now", "today", "tonight", "tomorrow", "next", "week", "weekend",
    "month", "day", "days", "night", "nights", "morning", "evening", "visit", "see", "go",
    "going", "travel", "explore", "book", "booking", "need", "want", "like", "show", "find",
    "get", "give", "tell", "check", "what", "whats", "how", "is", "are", "about", "around",
    "near", "there", "here", "city", "in", "at", "to", "for", "from", "on", "with", "and", "or",
    "of", "return", "one", "two", "three", "four", "five", "cheap", "best", "good", "top",
    "can", "could", "would", "do", "looking", "flying", "trip", "help",
];

/// Common abbreviations and misspellings, keyed by the lower-cased phrase.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("hyd", "Hyderabad"),
    ("hyderbad", "Hyderabad"),
    ("hydrabad", "Hyderabad"),
    ("blr", "Bangalore"),
    ("bengaluru", "Bangalore"),
    ("banglore", "Bangalore"),
    ("bangalor", "Bangalore"),
    ("bom", "Mumbai"),
    ("bombay", "Mumbai"),
    ("del", "Delhi"),
    ("dilli", "Delhi"),
    ("new delhi", "Delhi"),
    ("maa", "Chennai"),
    ("madras", "Chennai"),
    ("ccu", "Kolkata"),
    ("calcutta", "Kolkata"),
    ("benares", "Varanasi"),
    ("banaras", "Varanasi"),
    ("gurgaon", "Gurugram"),
    ("nyc", "New York"),
    ("ny", "New York"),
    ("la", "Los Angeles"),
    ("sf", "San Francisco"),
    ("ldn", "London"),
];

struct CityPattern {
    name: &'static str,
    regex: Regex,
}

fn patterns() -> &'static [CityPattern] {
    static PATTERNS: OnceLock<Vec<CityPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CITY_PATTERNS
            .iter()
            .filter_map(|&(name, source)| {
                let source = source.replace("{kw}", KEYWORD_ALTERNATION);
                match Regex::new(&source) {
                    Ok(regex) => Some(CityPattern { name, regex }),
                    Err(e) => {
                        tracing::error!(pattern = name, error = %e, "invalid city pattern");
                        None
                    }
                }
            })
            .collect()
    })
}

pub fn is_filler(word: &str) -> bool {
    FILLER_WORDS.contains(&word)
}

/// Trim a captured phrase down to the city: skip a leading article, stop
/// at the first filler word.
fn clean_capture(capture: &str) -> Option<String> {
    let words: Vec<&str> = capture
        .split_whitespace()
        .skip_while(|w| ARTICLES.contains(w))
        .take_while(|w| !is_filler(w))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Run the pattern table over `text`, returning the name of the first
/// pattern that produced a plausible city along with the raw (lower-case)
/// phrase. Captures made only of dialogue vocabulary are skipped.
pub fn match_pattern(text: &NormalizedText) -> Option<(&'static str, String)> {
    patterns().iter().find_map(|pattern| {
        pattern
            .regex
            .captures_iter(text.as_str())
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| clean_capture(m.as_str()))
            .find(|city| super::is_plausible_city(city))
            .map(|city| (pattern.name, city))
    })
}

/// Apply the alias table, otherwise title-case.
pub fn canonical_city(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    CITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, city)| city.to_string())
        .unwrap_or_else(|| title_case(&lowered))
}

/// Extract a city from an utterance. A single-token utterance is taken as
/// the city itself; otherwise the pattern table is tried, then the last
/// token. Only an empty utterance yields `None`.
pub fn extract_city(text: &NormalizedText) -> Option<String> {
    let raw = match text.single_token() {
        Some(token) => token.to_string(),
        None => match match_pattern(text) {
            Some((_, city)) => city,
            None => text.last_token()?.to_string(),
        },
    };
    Some(canonical_city(&raw))
}

/// Extract the city from a reply to a city prompt. Unless a pattern picks
/// the city out, the whole utterance up to the first filler word is taken,
/// so multi-word names survive. Only an empty utterance yields `None`.
pub fn extract_city_reply(text: &NormalizedText) -> Option<String> {
    let raw = match match_pattern(text) {
        Some((_, city)) => city,
        None => match clean_capture(text.as_str()) {
            Some(city) => city,
            None => text.last_token()?.to_string(),
        },
    };
    Some(canonical_city(&raw))
}
