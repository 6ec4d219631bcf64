use crate::models::Affirmation;

use super::NormalizedText;

pub const AFFIRMATIVE_WORDS: &[&str] = &[
    "yes", "yeah", "yep", "yup", "confirm", "confirmed", "ok", "okay", "sure",
    "absolutely", "definitely", "correct", "proceed",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "no", "nope", "nah", "cancel", "exit", "quit", "stop", "abort", "nevermind", "bye",
    "goodbye",
];

/// Words that end the conversation rather than just the current request.
pub const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

const AFFIRMATIVE_PHRASES: &[&str] = &["go ahead", "sounds good", "book it", "do it", "of course"];

const NEGATIVE_PHRASES: &[&str] = &["never mind", "not now", "forget it", "dont", "do not"];

/// Classify the whole utterance against the phrase sets, then its first
/// token against the word sets.
pub fn classify(text: &NormalizedText) -> Affirmation {
    let whole = text.as_str();
    if AFFIRMATIVE_PHRASES.contains(&whole) {
        return Affirmation::Affirm;
    }
    if NEGATIVE_PHRASES.contains(&whole) {
        return Affirmation::Deny;
    }

    match text.first_token() {
        Some(word) if AFFIRMATIVE_WORDS.contains(&word) => Affirmation::Affirm,
        Some(word) if NEGATIVE_WORDS.contains(&word) => Affirmation::Deny,
        _ => Affirmation::Neither,
    }
}

/// Whether the whole utterance is a negative word or phrase, as opposed to
/// merely starting with one.
pub fn is_negation(text: &NormalizedText) -> bool {
    let whole = text.as_str();
    NEGATIVE_WORDS.contains(&whole) || NEGATIVE_PHRASES.contains(&whole)
}

pub fn is_exit(text: &NormalizedText) -> bool {
    text.first_token()
        .map(|word| EXIT_WORDS.contains(&word))
        .unwrap_or(false)
}
