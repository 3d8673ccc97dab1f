pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod document;
pub mod error;
pub mod trigger;

pub use checker::dictionary::Dictionary;
pub use checker::scan;
pub use config::Config;
pub use error::ScanError;
pub use trigger::controller::{Readiness, ScanController, ScanHandle};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence counts of unknown words, keyed by their lowercase form.
///
/// Rebuilt from empty on every scan; counts are always positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MistakeRecord {
    counts: BTreeMap<String, usize>,
}

impl MistakeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct unknown words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Entries ordered by descending count, ties broken alphabetically.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Snapshot produced by one complete scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub total_tokens_scanned: usize,
    pub mistakes: MistakeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_empty_words() {
        let mut record = MistakeRecord::new();
        record.increment("");
        record.increment("teh");
        record.increment("teh");
        assert_eq!(record.len(), 1);
        assert_eq!(record.count("teh"), 2);
        assert_eq!(record.count("missing"), 0);
    }

    #[test]
    fn test_ranked_order() {
        let mut record = MistakeRecord::new();
        for word in ["zed", "abc", "helo", "helo", "abc", "helo"] {
            record.increment(word);
        }
        assert_eq!(record.ranked(), vec![("helo", 3), ("abc", 2), ("zed", 1)]);
        assert_eq!(record.total(), 6);
    }

    #[test]
    fn test_result_serializes_counts_as_map() {
        let mut mistakes = MistakeRecord::new();
        mistakes.increment("helo");
        let result = ScanResult {
            total_tokens_scanned: 3,
            mistakes,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_tokens_scanned"], 3);
        assert_eq!(json["mistakes"]["helo"], 1);
    }
}
