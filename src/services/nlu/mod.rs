//! Rule-based understanding of a single utterance: normalization plus the
//! slot extractors the dialogue state machine consumes. Every extractor is
//! total and returns `None` instead of failing.

pub mod affirmation;
pub mod choice;
pub mod city;
pub mod keywords;
pub mod normalize;

pub use affirmation::classify;
pub use choice::extract_choice;
pub use city::extract_city;
pub use keywords::{bare_action, detect_action};
pub use normalize::{normalize, title_case, NormalizedText};

/// Whether `candidate` could plausibly name a city: it must contain a
/// letter and must not consist solely of words the dialogue itself uses
/// (intent keywords, filler, yes/no words, option numbers and ordinals).
pub fn is_plausible_city(candidate: &str) -> bool {
    if !candidate.chars().any(char::is_alphabetic) {
        return false;
    }
    let lowered = candidate.to_lowercase();
    !lowered.split_whitespace().all(|word| {
        keywords::is_keyword(word)
            || city::is_filler(word)
            || choice::is_choice_word(word)
            || affirmation::AFFIRMATIVE_WORDS.contains(&word)
            || affirmation::NEGATIVE_WORDS.contains(&word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_city() {
        assert!(is_plausible_city("Paris"));
        assert!(is_plausible_city("New York"));
        assert!(!is_plausible_city("Hotel"));
        assert!(!is_plausible_city("Please"));
        assert!(!is_plausible_city("Yes"));
        assert!(!is_plausible_city("Second"));
        assert!(!is_plausible_city("the 3rd"));
        assert!(!is_plausible_city("42"));
        assert!(!is_plausible_city(""));
    }
}
