use std::fmt;

/// An utterance with punctuation removed, whitespace collapsed and case
/// folded to lower.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn first_token(&self) -> Option<&str> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<&str> {
        self.tokens().last()
    }

    /// The text itself when it is exactly one token.
    pub fn single_token(&self) -> Option<&str> {
        let mut tokens = self.tokens();
        match (tokens.next(), tokens.next()) {
            (Some(token), None) => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(utterance: &str) -> NormalizedText {
    let kept: String = utterance
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    NormalizedText(kept.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Upper-case the first letter of every word: "new york" -> "New York".
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize("  Weather in TOKYO?!  ").as_str(), "weather in tokyo");
        assert_eq!(normalize("Book,  a\thotel...").as_str(), "book a hotel");
        assert_eq!(normalize("don't").as_str(), "dont");
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("?!. ,").is_empty());
    }

    #[test]
    fn test_single_token() {
        assert_eq!(normalize("Paris!").single_token(), Some("paris"));
        assert_eq!(normalize("new york").single_token(), None);
        assert_eq!(normalize("").single_token(), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("alice smith"), "Alice Smith");
        assert_eq!(title_case("new  york"), "New York");
        assert_eq!(title_case(""), "");
    }
}
