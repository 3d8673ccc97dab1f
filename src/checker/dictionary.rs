use fst::{Set, SetBuilder, Streamer};
use tracing::{debug, warn};

/// Immutable set of known lowercase words.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Build a dictionary from a raw word list, one word per line.
    ///
    /// Each line is trimmed (whitespace, control and zero-width characters)
    /// and lowercased; empty lines are dropped and duplicates collapse.
    /// Empty input yields an empty dictionary.
    pub fn build(raw_text: &str) -> Self {
        let mut words: Vec<String> = raw_text
            .lines()
            .map(|line| line.trim_matches(is_hidden).to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        words.sort();
        words.dedup();

        let mut builder = SetBuilder::memory();
        for word in &words {
            if let Err(e) = builder.insert(word.as_bytes()) {
                warn!("Skipping dictionary word {:?}: {}", word, e);
            }
        }

        let dictionary = Self {
            set: builder.into_set(),
        };
        debug!("Built dictionary with {} words", dictionary.len());
        dictionary
    }

    /// True if `build` would keep at least one word from `raw_text`.
    pub fn has_words(raw_text: &str) -> bool {
        raw_text
            .lines()
            .any(|line| !line.trim_matches(is_hidden).is_empty())
    }

    pub fn empty() -> Self {
        Self {
            set: SetBuilder::memory().into_set(),
        }
    }

    /// Check if word exists in dictionary. Lookups are exact; callers lowercase first.
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// All words in byte order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.len());
        let mut stream = self.set.stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                words.push(word);
            }
        }

        words
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary").field("len", &self.len()).finish()
    }
}

fn is_hidden(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '\u{200b}'..='\u{200d}' | '\u{2060}' | '\u{feff}')
}
