//! Diagnostic logging.
//!
//! The chat screen owns the terminal, so log output goes to a file chosen
//! with `--log`. Without one, events are discarded.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `recipe_bot=debug`.
pub const LOG_FILTER_ENV: &str = "RECIPE_BOT_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Appends to `log_file` when given.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| err.to_string())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Logging started");
    Ok(())
}
