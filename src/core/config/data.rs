use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{
    API_KEY_ENV, CACHE_KEY, DEFAULT_BASE_URL, DEFAULT_SEARCH_RESULTS, DEFAULT_TIMEOUT_SECS,
};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Recipe service key. Falls back to the `SPOONACULAR_API_KEY`
    /// environment variable when unset.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Number of hits requested by "search recipes on ..." and "list ... recipes"
    pub search_results: Option<u32>,
    /// Where the conversation is persisted
    pub history_file: Option<PathBuf>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.local/share/recipe-bot/fl_chatbot_cache.json` → `~/.local/share/recipe-bot/fl_chatbot_cache.json`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Configured key, else the environment variable. Empty values count
    /// as missing.
    pub fn effective_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn effective_search_results(&self) -> u32 {
        self.search_results.unwrap_or(DEFAULT_SEARCH_RESULTS).max(1)
    }

    /// Configured history file, else `<data dir>/fl_chatbot_cache.json`.
    pub fn effective_history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join(format!("{CACHE_KEY}.json")))
    }
}
