//! `history` and `clear` for the stored conversation.

use std::error::Error;

use crate::core::config::data::{path_display, Config};
use crate::core::message::DisplayMessage;
use crate::core::store::{JsonFileStore, MessageStore, StoreError};
use crate::ui::bubbles::message_plain_text;

/// Stored messages rendered oldest first.
pub fn history_lines(store: &dyn MessageStore) -> Result<Vec<String>, StoreError> {
    let messages: Vec<DisplayMessage> = store.get()?;
    Ok(messages.iter().rev().map(message_plain_text).collect())
}

pub fn run_history(config: &Config) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::new(config.effective_history_file());
    let lines = history_lines(&store)?;
    if lines.is_empty() {
        println!("No conversation stored yet.");
    } else {
        println!("{}", lines.join("\n\n"));
    }
    Ok(())
}

pub fn run_clear(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut store = JsonFileStore::new(config.effective_history_file());
    store.set(&[])?;
    println!("✅ Cleared conversation at {}", path_display(store.path()));
    Ok(())
}
