//! Persistence slots for the theme preference
//!
//! A slot is a small durable key-value store. The theme store only ever
//! touches one key, but slots are keyed so a single preferences file can
//! hold other settings too.

use folio_core::sync::{read, write};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Failure reading or writing a persistence slot
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or not present on this host
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("preference storage is corrupt: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Durable key-value storage for user preferences
pub trait PreferenceSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared slot handle
pub type SharedSlot = Arc<dyn PreferenceSlot>;

// ============================================================================
// In-memory
// ============================================================================

/// In-process slot. Clones share the same storage.
#[derive(Clone, Default)]
pub struct MemorySlot {
    values: Arc<RwLock<FxHashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a value, e.g. one written by "another tab"
    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::new();
        write(&slot.values).insert(key.to_string(), value.to_string());
        slot
    }
}

impl PreferenceSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(read(&self.values).get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        write(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        write(&self.values).remove(key);
        Ok(())
    }
}

// ============================================================================
// Unavailable
// ============================================================================

/// Slot for hosts without durable storage. Every operation fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableSlot;

impl PreferenceSlot for UnavailableSlot {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("no storage backend".to_string()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no storage backend".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no storage backend".to_string()))
    }
}

// ============================================================================
// JSON file
// ============================================================================

/// Slot backed by a JSON object file.
///
/// Concurrent writers are not coordinated; the last write wins.
#[derive(Clone, Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/folio/preferences.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("preferences.json"))
    }

    /// Slot at [`FileSlot::default_path`]
    pub fn at_default_location() -> Result<Self, StorageError> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| StorageError::Unavailable("no config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// Existing values, or an empty map when the file is corrupt
    fn load_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Codec(err)) => {
                tracing::warn!(
                    "FileSlot: discarding corrupt preferences at {}: {}",
                    self.path.display(),
                    err
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl PreferenceSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load_for_update()?;
        if values.remove(key).is_some() {
            self.store(&values)?;
        }
        Ok(())
    }
}

/// Preferences file at [`FileSlot::default_path`], or an in-memory slot
/// when the platform has no config directory
pub fn default_slot() -> SharedSlot {
    match FileSlot::at_default_location() {
        Ok(slot) => {
            tracing::debug!("default_slot - using {}", slot.path().display());
            Arc::new(slot)
        }
        Err(err) => {
            tracing::warn!("default_slot - {}, keeping preferences in memory", err);
            Arc::new(MemorySlot::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_path_lives_under_folio_dir() {
        match FileSlot::default_path() {
            Some(path) => {
                assert!(path.ends_with("folio/preferences.json"));
                assert_eq!(
                    FileSlot::at_default_location().unwrap().path(),
                    path.as_path()
                );
            }
            None => assert!(FileSlot::at_default_location().is_err()),
        }
    }

    #[test]
    fn test_memory_slot_clones_share_values() {
        let slot = MemorySlot::new();
        let other = slot.clone();
        slot.write("portfolio-theme", "dark").unwrap();
        assert_eq!(
            other.read("portfolio-theme").unwrap().as_deref(),
            Some("dark")
        );
        other.remove("portfolio-theme").unwrap();
        assert_eq!(slot.read("portfolio-theme").unwrap(), None);
    }

    #[test]
    fn test_file_slot_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("prefs.json"));
        assert_eq!(slot.read("portfolio-theme").unwrap(), None);
    }

    #[test]
    fn test_file_slot_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FileSlot::new(&path).write("portfolio-theme", "purple").unwrap();
        FileSlot::new(&path).write("other", "kept").unwrap();

        let reopened = FileSlot::new(&path);
        assert_eq!(
            reopened.read("portfolio-theme").unwrap().as_deref(),
            Some("purple")
        );
        assert_eq!(reopened.read("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_file_slot_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let slot = FileSlot::new(&path);
        assert!(matches!(
            slot.read("portfolio-theme"),
            Err(StorageError::Codec(_))
        ));

        // Writing replaces the corrupt file
        slot.write("portfolio-theme", "dark").unwrap();
        assert_eq!(slot.read("portfolio-theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unavailable_slot_always_errors() {
        let slot = UnavailableSlot;
        assert!(slot.read("k").is_err());
        assert!(slot.write("k", "v").is_err());
        assert!(slot.remove("k").is_err());
    }
}
