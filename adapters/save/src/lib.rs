#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence adapter for the Gatefall save record.
//!
//! The simulation core never touches the filesystem; adapters load the
//! [`SaveData`] record at boot and store fresh snapshots whenever a
//! persistence-relevant event fires. The file store writes the serialized
//! record to a sibling temp file and renames it over the target, so a crash
//! mid-write leaves the previous save intact.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gatefall_core::SaveData;
use thiserror::Error;

/// Errors surfaced by save stores.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The underlying filesystem operation failed.
    #[error("save file io failed: {0}")]
    Io(#[from] io::Error),
    /// The stored record could not be parsed.
    #[error("save file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Boundary through which the engine's meta progression is persisted.
pub trait SaveStore {
    /// Loads the persisted record; a missing record yields the defaults.
    fn load(&self) -> Result<SaveData, SaveError>;

    /// Persists the provided record crash-safely.
    fn store(&self, data: &SaveData) -> Result<(), SaveError>;
}

/// File-backed store that keeps the record as pretty-printed JSON.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the provided path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_owned();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for FileStore {
    fn load(&self) -> Result<SaveData, SaveError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(SaveData::default());
            }
            Err(error) => return Err(error.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    fn store(&self, data: &SaveData) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(data)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        // the rename is the commit point; a crash before it leaves the old
        // record untouched
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RefCell<SaveData>,
}

impl MemoryStore {
    /// Creates a store holding the provided record.
    #[must_use]
    pub fn with_record(record: SaveData) -> Self {
        Self {
            record: RefCell::new(record),
        }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<SaveData, SaveError> {
        Ok(self.record.borrow().clone())
    }

    fn store(&self, data: &SaveData) -> Result<(), SaveError> {
        *self.record.borrow_mut() = data.clone();
        Ok(())
    }
}
