use super::data::Config;
use super::io::ConfigError;
use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_SEARCH_RESULTS, DEFAULT_TIMEOUT_SECS};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config {
        api_key: Some("key-123".to_string()),
        base_url: Some("http://127.0.0.1:9000/recipes".to_string()),
        timeout_secs: Some(7),
        search_results: Some(4),
        history_file: Some(PathBuf::from("/tmp/recipe-history.json")),
    };
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded, config);

    config.base_url = None;
    config.search_results = None;
    config.save_to_path(&config_path).expect("second save failed");

    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.base_url, None);
    assert_eq!(reloaded.search_results, None);
    assert_eq!(reloaded.timeout_secs, Some(7));

    let raw = fs::read_to_string(&config_path).expect("read");
    assert!(!raw.contains("base_url"));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "timeout_secs = \"soon\"").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    let config_err = err
        .downcast_ref::<ConfigError>()
        .expect("expected a ConfigError");
    assert!(matches!(config_err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_defaults_apply_when_unset() {
    let config = Config::default();
    assert_eq!(config.effective_base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.effective_search_results(), DEFAULT_SEARCH_RESULTS);
    assert!(config
        .effective_history_file()
        .ends_with("fl_chatbot_cache.json"));
}

#[test]
fn test_degenerate_numbers_are_clamped() {
    let config = Config {
        timeout_secs: Some(0),
        search_results: Some(0),
        ..Config::default()
    };
    assert_eq!(config.timeout(), Duration::from_secs(1));
    assert_eq!(config.effective_search_results(), 1);
}

#[test]
fn test_configured_api_key_wins() {
    let config = Config {
        api_key: Some("from-config".to_string()),
        ..Config::default()
    };
    assert_eq!(config.effective_api_key().as_deref(), Some("from-config"));

    let blank = Config {
        api_key: Some("   ".to_string()),
        ..Config::default()
    };
    assert_eq!(blank.effective_api_key(), None);
}
