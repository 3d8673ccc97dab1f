use super::dictionary::Dictionary;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

/// Separator joining the parts of a compound token (`snake_case`).
pub const PART_SEPARATOR: char = '_';

lazy_static! {
    // Word tokens that read as numbers: 42, １２３, 1e5, 0xff, 0o17, 0b101, Infinity.
    // `\d` is any Unicode decimal digit.
    static ref NUMERIC: Regex = Regex::new(
        r"^(?:\d+(?:[eE]\d+)?|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+|Infinity)$"
    )
    .unwrap();
}

pub fn is_numeric(token: &str) -> bool {
    NUMERIC.is_match(token)
}

/// Lowercase parts of `token` that are missing from the dictionary.
///
/// Numeric tokens yield nothing. Otherwise the token is split on
/// [`PART_SEPARATOR`] and every non-empty part is checked on its own.
pub fn classify(token: &str, dictionary: &Dictionary) -> BTreeSet<String> {
    if is_numeric(token) {
        return BTreeSet::new();
    }

    token
        .split(PART_SEPARATOR)
        .map(str::to_lowercase)
        .filter(|part| !part.is_empty() && !dictionary.contains(part))
        .collect()
}
