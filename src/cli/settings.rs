//! `set` and `unset` for the configuration file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::config::data::{path_display, Config};
use crate::utils::url::normalize_base_url;

pub const KEYS: [&str; 5] = [
    "api-key",
    "base-url",
    "timeout-secs",
    "search-results",
    "history-file",
];

#[derive(Debug)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The value could not be parsed for the key.
    InvalidValue {
        key: &'static str,
        input: String,
        expected: &'static str,
    },
    /// An error occurred while loading or persisting the configuration.
    ConfigError(String),
}

impl SettingError {
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Available keys: {}", KEYS.join(", "));
            }
            SettingError::InvalidValue {
                key,
                input,
                expected,
            } => {
                eprintln!("❌ Invalid value for {key}: {input}");
                eprintln!("   Expected {expected}");
            }
            SettingError::ConfigError(msg) => {
                eprintln!("❌ Failed to update configuration: {msg}");
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidValue { key, input, .. } => {
                write!(f, "Invalid value for {key}: {input}")
            }
            SettingError::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SettingError {}

fn parse_positive<T: std::str::FromStr + PartialOrd + Default>(
    key: &'static str,
    input: &str,
) -> Result<T, SettingError> {
    match input.parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(SettingError::InvalidValue {
            key,
            input: input.to_string(),
            expected: "a positive whole number",
        }),
    }
}

/// Apply `set <key> <value>` to `config`, returning the success message.
pub fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<String, SettingError> {
    let message = match key {
        "api-key" => {
            config.api_key = Some(value.to_string());
            "✅ Set api-key".to_string()
        }
        "base-url" => {
            let url = normalize_base_url(value);
            let message = format!("✅ Set base-url to: {url}");
            config.base_url = Some(url);
            message
        }
        "timeout-secs" => {
            let secs: u64 = parse_positive("timeout-secs", value)?;
            config.timeout_secs = Some(secs);
            format!("✅ Set timeout-secs to: {secs}")
        }
        "search-results" => {
            let count: u32 = parse_positive("search-results", value)?;
            config.search_results = Some(count);
            format!("✅ Set search-results to: {count}")
        }
        "history-file" => {
            let path = PathBuf::from(value);
            let message = format!("✅ Set history-file to: {}", path_display(&path));
            config.history_file = Some(path);
            message
        }
        other => return Err(SettingError::UnknownKey(other.to_string())),
    };
    Ok(message)
}

pub fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "api-key" => config.api_key = None,
        "base-url" => config.base_url = None,
        "timeout-secs" => config.timeout_secs = None,
        "search-results" => config.search_results = None,
        "history-file" => config.history_file = None,
        other => return Err(SettingError::UnknownKey(other.to_string())),
    }
    Ok(format!("✅ Unset {key}"))
}

fn load(path: &Path) -> Result<Config, SettingError> {
    Config::load_from_path(path).map_err(|e| SettingError::ConfigError(e.to_string()))
}

fn save(config: &Config, path: &Path) -> Result<(), SettingError> {
    config
        .save_to_path(path)
        .map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// `set` against the config file at `path`. Without a value the current
/// configuration is printed instead.
pub fn set_in(path: &Path, key: &str, value: Option<&[String]>) -> Result<Option<String>, SettingError> {
    let mut config = load(path)?;
    let value = value.map(|parts| parts.join(" ")).filter(|v| !v.trim().is_empty());
    let Some(value) = value else {
        config.print_all();
        return Ok(None);
    };
    let message = apply_set(&mut config, key, value.trim())?;
    save(&config, path)?;
    Ok(Some(message))
}

pub fn unset_in(path: &Path, key: &str) -> Result<String, SettingError> {
    let mut config = load(path)?;
    let message = apply_unset(&mut config, key)?;
    save(&config, path)?;
    Ok(message)
}
