//! File-backed persistence rooted at a single per-user application directory.
//!
//! Every record is read and written whole; history and stats are fully
//! re-serialized on each write. The store has no locking of its own, callers
//! serialize writes to a given record.

mod error;

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::PROMPTS;
use crate::state::{Turn, UsageStats};

pub use error::StoreError;

/// Directory under the root holding named data blobs.
pub const DATA_DIR: &str = "data";

/// The fixed records the session engine persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Plain-text system prompt, seeded from the bundled template.
    System,
    /// JSON array of turns.
    Conversation,
    /// JSON `{total_tokens}`.
    Stats,
}

impl Record {
    pub fn relative_path(&self) -> &'static str {
        match self {
            Record::System => "system.md",
            Record::Conversation => "conversations/conversation.json",
            Record::Stats => "stats.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create a store rooted at `root`. Nothing touches the disk until first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store and make sure its root directory exists.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).map_err(|e| StoreError::io("creating directory", &store.root, e))?;
        Ok(store)
    }

    pub fn path(&self, record: Record) -> PathBuf {
        self.root.join(record.relative_path())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn read(&self, record: Record) -> Result<Vec<u8>, StoreError> {
        read_path(&self.path(record))
    }

    pub fn write(&self, record: Record, bytes: &[u8]) -> Result<(), StoreError> {
        write_path(&self.path(record), bytes)
    }

    pub fn exists(&self, record: Record) -> bool {
        self.path(record).is_file()
    }

    // =========================================================================
    // Named data blobs
    // =========================================================================

    fn named_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let rel = Path::new(name);
        let valid = !name.is_empty() && rel.components().all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(StoreError::InvalidName { name: name.to_string() });
        }
        Ok(self.data_dir().join(rel))
    }

    pub fn read_named(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        read_path(&self.named_path(name)?)
    }

    pub fn write_named(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        write_path(&self.named_path(name)?, bytes)
    }

    pub fn named_exists(&self, name: &str) -> bool {
        self.named_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn read_named_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.named_path(name)?;
        parse_json(&path, &read_path(&path)?)
    }

    pub fn write_named_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize { source })?;
        self.write_named(name, &bytes)
    }

    // =========================================================================
    // Typed records
    // =========================================================================

    pub fn load_history(&self) -> Result<Vec<Turn>, StoreError> {
        let path = self.path(Record::Conversation);
        parse_json(&path, &read_path(&path)?)
    }

    pub fn save_history(&self, history: &[Turn]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(history).map_err(|source| StoreError::Serialize { source })?;
        self.write(Record::Conversation, &bytes)
    }

    pub fn load_stats(&self) -> Result<UsageStats, StoreError> {
        let path = self.path(Record::Stats);
        parse_json(&path, &read_path(&path)?)
    }

    pub fn save_stats(&self, stats: &UsageStats) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(stats).map_err(|source| StoreError::Serialize { source })?;
        self.write(Record::Stats, &bytes)
    }

    /// Read the system prompt, copying the bundled template into place on first use.
    pub fn read_system_prompt(&self) -> Result<String, StoreError> {
        if !self.exists(Record::System) {
            self.write(Record::System, PROMPTS.system_template.as_bytes())?;
            tracing::info!(path = %self.path(Record::System).display(), "seeded system prompt from template");
        }
        let bytes = self.read(Record::System)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_path(path: &Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).map_err(|e| StoreError::io("reading", path, e))
}

fn write_path(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io("creating directory", parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| StoreError::io("writing", path, e))
}

fn parse_json<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })
}
