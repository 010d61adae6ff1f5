//! Persistence for the conversation.
//!
//! The whole conversation is one blob stored under [`CACHE_KEY`] and is
//! rewritten on every change. Loader placeholders are transient and never
//! reach the store.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::config::data::path_display;
use crate::core::constants::CACHE_KEY;
use crate::core::message::DisplayMessage;

#[derive(Debug)]
pub enum StoreError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { path, source } => {
                write!(f, "Failed to read history at {}: {}", path_display(path), source)
            }
            StoreError::Write { path, source } => {
                write!(f, "Failed to write history at {}: {}", path_display(path), source)
            }
            StoreError::Decode { path, source } => {
                write!(f, "Failed to parse history at {}: {}", path_display(path), source)
            }
            StoreError::Encode(source) => write!(f, "Failed to encode history: {source}"),
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::Read { source, .. } | StoreError::Write { source, .. } => Some(source),
            StoreError::Decode { source, .. } => Some(source),
            StoreError::Encode(source) => Some(source),
        }
    }
}

/// Whole-conversation persistence, newest message first.
pub trait MessageStore: Send {
    fn get(&self) -> Result<Vec<DisplayMessage>, StoreError>;

    fn set(&mut self, messages: &[DisplayMessage]) -> Result<(), StoreError>;
}

fn persistable(messages: &[DisplayMessage]) -> Vec<DisplayMessage> {
    messages
        .iter()
        .filter(|message| !message.is_loader())
        .cloned()
        .collect()
}

/// JSON file holding `{ "<cache key>": [messages...] }`.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, contents: &str) -> Result<(), std::io::Error> {
        let parent = self.path.parent().filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };
        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl MessageStore for JsonFileStore {
    fn get(&self) -> Result<Vec<DisplayMessage>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut blob: BTreeMap<String, Vec<DisplayMessage>> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;
        let messages = blob.remove(CACHE_KEY).unwrap_or_default();
        Ok(persistable(&messages))
    }

    fn set(&mut self, messages: &[DisplayMessage]) -> Result<(), StoreError> {
        let mut blob = BTreeMap::new();
        blob.insert(CACHE_KEY, persistable(messages));
        let contents = serde_json::to_string_pretty(&blob).map_err(StoreError::Encode)?;
        self.write_atomically(&contents)
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

/// Store kept in memory.
#[derive(Default)]
pub struct MemoryStore {
    messages: Vec<DisplayMessage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for MemoryStore {
    fn get(&self) -> Result<Vec<DisplayMessage>, StoreError> {
        Ok(self.messages.clone())
    }

    fn set(&mut self, messages: &[DisplayMessage]) -> Result<(), StoreError> {
        self.messages = persistable(messages);
        Ok(())
    }
}
