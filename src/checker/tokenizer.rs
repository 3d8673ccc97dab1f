use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Unicode word characters: letters, marks, digits, connector punctuation.
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// Extract maximal runs of word characters in document order.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_in_order() {
        assert_eq!(tokenize("Foo_bar 123 baz!"), vec!["Foo_bar", "123", "baz"]);
    }

    #[test]
    fn test_punctuation_is_discarded() {
        assert_eq!(
            tokenize("don't -- stop; (now)...\n\tok?"),
            vec!["don", "t", "stop", "now", "ok"]
        );
        assert!(tokenize("  ... !!! ---").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_separator_runs_are_tokens() {
        assert_eq!(tokenize("a __ b"), vec!["a", "__", "b"]);
    }

    #[test]
    fn test_accented_words_stay_whole() {
        assert_eq!(tokenize("café naïve"), vec!["café", "naïve"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "The quick brown_fox jumps 42 times.";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
