//! Word list suppliers. The scanner only ever sees the raw text they return.

pub mod manager;

use crate::error::{Result, ScanError};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Pinned word list, one lowercase word per line.
pub const DEFAULT_WORDLIST_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23/words_alpha.txt";

#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Fetch the raw word list text.
    async fn fetch_raw_text(&self) -> Result<String>;

    /// Human readable origin, for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: DictionarySource + ?Sized> DictionarySource for Box<T> {
    async fn fetch_raw_text(&self) -> Result<String> {
        (**self).fetch_raw_text().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    async fn fetch_raw_text(&self) -> Result<String> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ScanError::DictionaryUnavailable(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Word list stored in a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DictionarySource for FileSource {
    async fn fetch_raw_text(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ScanError::DictionaryUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Word list held in memory.
pub struct InMemorySource {
    text: String,
}

impl InMemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl DictionarySource for InMemorySource {
    async fn fetch_raw_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory word list ({} bytes)", self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();

        let text = FileSource::new(&path).fetch_raw_text().await.unwrap();
        assert_eq!(text, "alpha\nbeta\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.txt"));

        let err = source.fetch_raw_text().await.unwrap_err();
        assert!(matches!(err, ScanError::DictionaryUnavailable(_)));
    }

    #[tokio::test]
    async fn test_boxed_source_delegates() {
        let source: Box<dyn DictionarySource> = Box::new(InMemorySource::new("word"));
        assert_eq!(source.fetch_raw_text().await.unwrap(), "word");
        assert!(source.describe().contains("4 bytes"));
    }
}
