use crate::dict::DEFAULT_WORDLIST_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,

    /// Local word list; takes precedence over `dictionary_url`.
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Unset means "cache"; kept optional so a config file that does not
    /// mention it leaves an earlier layer's choice alone.
    #[serde(default)]
    pub use_cache: Option<bool>,
}

fn default_dictionary_url() -> String {
    DEFAULT_WORDLIST_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            dictionary_path: None,
            debounce_ms: default_debounce_ms(),
            use_cache: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        dictionary_path: Option<PathBuf>,
        debounce_ms: Option<u64>,
        no_cache: bool,
    ) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".spellscan.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(path) = dictionary_path {
            config.dictionary_path = Some(path);
        }
        if let Some(ms) = debounce_ms {
            config.debounce_ms = ms;
        }
        if no_cache {
            config.use_cache = Some(false);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        if other.dictionary_url != DEFAULT_WORDLIST_URL {
            self.dictionary_url = other.dictionary_url;
        }
        if other.dictionary_path.is_some() {
            self.dictionary_path = other.dictionary_path;
        }
        if other.debounce_ms != default_debounce_ms() {
            self.debounce_ms = other.debounce_ms;
        }
        if other.use_cache.is_some() {
            self.use_cache = other.use_cache;
        }
        self
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache.unwrap_or(true)
    }

    /// Debounce window for interaction-triggered scans, at least 1ms.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.max(1))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellscan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellscan").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
