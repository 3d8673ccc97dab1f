use super::{DictionarySource, HttpSource};
use crate::checker::dictionary::Dictionary;
use crate::error::{Result as FetchResult, ScanError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Downloads the word list once and serves it from the data directory afterwards.
///
/// Each URL gets its own cache file, so changing the configured URL fetches
/// the new list instead of serving the old one.
pub struct CachedSource {
    remote: HttpSource,
    cache_path: PathBuf,
}

impl CachedSource {
    pub fn new(url: impl Into<String>, cache_dir: impl AsRef<Path>) -> Self {
        let url = url.into();
        let cache_path = cache_file(cache_dir.as_ref(), &url);
        Self {
            remote: HttpSource::new(url),
            cache_path,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

#[async_trait]
impl DictionarySource for CachedSource {
    async fn fetch_raw_text(&self) -> FetchResult<String> {
        if let Ok(text) = tokio::fs::read_to_string(&self.cache_path).await {
            if Dictionary::has_words(&text) {
                debug!("Using cached word list {}", self.cache_path.display());
                return Ok(text);
            }
            warn!("Ignoring cached word list without words: {}", self.cache_path.display());
        }

        let text = self.remote.fetch_raw_text().await?;

        if let Some(parent) = self.cache_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if let Err(e) = tokio::fs::write(&self.cache_path, &text).await {
            warn!("Failed to cache word list at {}: {}", self.cache_path.display(), e);
        }

        Ok(text)
    }

    fn describe(&self) -> String {
        format!("{} (cached at {})", self.remote.describe(), self.cache_path.display())
    }
}

/// Cache file for `url` inside `cache_dir`: `words-<first 16 hex of sha256(url)>.txt`.
pub fn cache_file(cache_dir: &Path, url: &str) -> PathBuf {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    cache_dir.join(format!("words-{}.txt", &digest[..16]))
}

pub fn cache_dir() -> Result<PathBuf> {
    crate::config::Config::data_dir().context("Failed to get data directory")
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = cache_dir()?;

    if !data_dir.exists() {
        println!("{}", "No word lists cached.".yellow());
        println!(
            "Run {} to download one.",
            "spellscan dict download".cyan()
        );
        return Ok(());
    }

    println!("{}", "Cached word lists:".bold());
    println!();

    let mut found_any = false;

    for entry in fs::read_dir(&data_dir)? {
        let path = entry?.path();

        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            found_any = true;
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown");
            let size_kb = fs::metadata(&path)?.len() / 1024;

            println!(
                "  {} {} ({})",
                "✓".green(),
                name.cyan().bold(),
                format!("{}KB", size_kb).dimmed()
            );
        }
    }

    if !found_any {
        println!("{}", "No word lists found.".yellow());
    }

    println!();
    println!(
        "Data directory: {}",
        data_dir.display().to_string().dimmed()
    );

    Ok(())
}

/// Fetch `url` and store it as the cached word list, replacing any previous copy.
pub async fn download_dictionary(url: &str, cache_path: &Path) -> Result<()> {
    println!("{} word list...", "Downloading".cyan().bold());
    println!("Source: {}", url.dimmed());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message("Downloading...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let fetched = HttpSource::new(url).fetch_raw_text().await;
    pb.finish_and_clear();
    let text = fetched.context("Failed to download word list")?;

    let dictionary = Dictionary::build(&text);
    if dictionary.is_empty() {
        return Err(ScanError::DictionaryUnavailable(format!("{} contains no words", url)).into());
    }
    println!("Found {} words", dictionary.len().to_string().yellow());

    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }
    fs::write(cache_path, &text)
        .with_context(|| format!("Failed to write word list: {}", cache_path.display()))?;

    println!(
        "{} Word list installed: {}",
        "✓".green().bold(),
        cache_path.display().to_string().cyan()
    );

    Ok(())
}

pub fn show_info(path: &Path) -> Result<()> {
    if !path.exists() {
        println!(
            "{} Word list {} not found.",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        println!("Run {} to download it.", "spellscan dict download".cyan());
        return Ok(());
    }

    let metadata = fs::metadata(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;
    let dictionary = Dictionary::build(&text);

    println!("{}", "Word list".bold());
    println!("  Path: {}", path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Words: {}", dictionary.len());

    Ok(())
}
