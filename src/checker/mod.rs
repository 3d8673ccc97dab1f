pub mod aggregator;
pub mod classifier;
pub mod dictionary;
pub mod tokenizer;

use crate::ScanResult;
use dictionary::Dictionary;
use tracing::debug;

/// Run the whole pipeline over one document snapshot.
pub fn scan(text: &str, dictionary: &Dictionary) -> ScanResult {
    let tokens = tokenizer::tokenize(text);
    let result = aggregator::aggregate(&tokens, dictionary);

    debug!(
        "Scanned {} tokens, {} distinct unknown words",
        result.total_tokens_scanned,
        result.mistakes.len()
    );

    result
}
