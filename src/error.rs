use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The word list could not be fetched, or came back empty.
    #[error("dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
