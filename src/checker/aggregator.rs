use super::classifier::classify;
use super::dictionary::Dictionary;
use crate::{MistakeRecord, ScanResult};

/// Count unknown parts across `tokens`.
///
/// `total_tokens_scanned` is the number of raw tokens, before splitting
/// and before numeric tokens are filtered out.
pub fn aggregate<S: AsRef<str>>(tokens: &[S], dictionary: &Dictionary) -> ScanResult {
    let mut mistakes = MistakeRecord::new();

    for token in tokens {
        for part in classify(token.as_ref(), dictionary) {
            mistakes.increment(&part);
        }
    }

    ScanResult {
        total_tokens_scanned: tokens.len(),
        mistakes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let dict = Dictionary::build("world");
        let result = aggregate(&["Helo", "world", "helo"], &dict);
        assert_eq!(result.total_tokens_scanned, 3);
        assert_eq!(result.mistakes.count("helo"), 2);
        assert_eq!(result.mistakes.len(), 1);
    }

    #[test]
    fn test_total_counts_raw_tokens() {
        let dict = Dictionary::build("known");
        let result = aggregate(&["teh_wrod", "2024", "known"], &dict);
        assert_eq!(result.total_tokens_scanned, 3);
        assert_eq!(result.mistakes.count("teh"), 1);
        assert_eq!(result.mistakes.count("wrod"), 1);
        assert_eq!(result.mistakes.total(), 2);
    }

    #[test]
    fn test_no_tokens() {
        let tokens: [&str; 0] = [];
        let result = aggregate(&tokens, &Dictionary::build("word"));
        assert_eq!(result, ScanResult::default());
    }

    #[test]
    fn test_empty_dictionary_flags_every_word() {
        let result = aggregate(&["alpha", "beta", "7", "alpha"], &Dictionary::empty());
        assert_eq!(result.mistakes.count("alpha"), 2);
        assert_eq!(result.mistakes.count("beta"), 1);
        assert_eq!(result.mistakes.count("7"), 0);
        assert_eq!(result.total_tokens_scanned, 4);
    }

    #[test]
    fn test_keys_never_in_dictionary() {
        let dict = Dictionary::build("the\ncat\nsat");
        let result = aggregate(&["The", "kat", "sat_on", "the_mat"], &dict);
        for (word, count) in result.mistakes.iter() {
            assert!(!word.is_empty());
            assert!(!dict.contains(word));
            assert!(count > 0);
        }
        assert_eq!(result.mistakes.len(), 3);
    }
}
