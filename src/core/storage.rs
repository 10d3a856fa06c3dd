//! # Preference Storage
//!
//! A tiny string key/value store persisted as JSON at
//! `~/.logshell/storage.json`. Writes use atomic rename (write `.tmp`, then
//! `rename()`), same as the rest of the on-disk state.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Parse(e) => write!(f, "storage parse error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Returns the path to `~/.logshell/storage.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".logshell").join("storage.json"))
}

#[derive(Debug, Default)]
pub struct LocalStorage {
    /// `None` keeps everything in memory (no home directory, or tests).
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(StorageError::Parse)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };
        info!("Opened preference storage at {}", path.display());
        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores the value in memory, then persists the whole map.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_atomic(path, &self.values)?;
        debug!("Persisted {}={} to {}", key, value, path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(StorageError::Io)?;
    }
    let json = serde_json::to_string_pretty(values).map_err(StorageError::Parse)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(StorageError::Io)?;
    fs::rename(&tmp, path).map_err(StorageError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_set_get() {
        let mut storage = LocalStorage::in_memory();
        assert!(storage.get("theme").is_none());
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme"), Some("light"));
        assert!(storage.path().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut storage = LocalStorage::open(path.clone()).unwrap();
        storage.set("theme", "dark").unwrap();

        let reopened = LocalStorage::open(path.clone()).unwrap();
        assert_eq!(reopened.get("theme"), Some("dark"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(LocalStorage::open(path), Err(StorageError::Parse(_))));
    }
}
