//! Durable key-value persistence for patterns
//!
//! Keys are pattern ids. Values are [`PatternRecord`]s serialized as JSON:
//! the display name next to the grid, one array per row holding color names
//! and `null` for unset cells.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::error::{DesignerError, Result, storage_error};
use crate::spatial::GridRecord;

/// Persisted form of one pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Display name; required for saved patterns
    #[serde(default)]
    pub name: Option<String>,
    /// Cell colors by name
    pub grid: GridRecord,
}

/// Durable storage collaborator keyed by pattern id
pub trait Storage {
    /// Store or overwrite the pattern under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be written
    fn persist(&mut self, key: &str, record: &PatternRecord) -> Result<()>;

    /// Read back the pattern stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read or parsed
    fn retrieve(&self, key: &str) -> Result<Option<PatternRecord>>;

    /// Delete the pattern stored under `key`; missing keys are not an error
    ///
    /// # Errors
    ///
    /// Returns an error if existing data cannot be deleted
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Every stored key, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the stored keys cannot be listed
    fn keys(&self) -> Result<Vec<String>>;
}

/// Process-local storage holding serialized patterns
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a key is stored
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn persist(&mut self, key: &str, record: &PatternRecord) -> Result<()> {
        let json =
            serde_json::to_string(record).map_err(|e| storage_error(key, "persist", e))?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Option<PatternRecord>> {
        self.entries
            .get(key)
            .map(|json| serde_json::from_str(json).map_err(|e| storage_error(key, "retrieve", e)))
            .transpose()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Whether `key` can name a file inside the storage directory
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Directory of `<key>.json` files, one per pattern
#[derive(Debug, Clone)]
pub struct JsonDirStorage {
    dir: PathBuf,
}

impl JsonDirStorage {
    /// Open a storage directory, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| DesignerError::FileSystem {
            path: dir.clone(),
            operation: "create directory",
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the pattern files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str, operation: &'static str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(storage_error(
                key,
                operation,
                "keys may only contain ASCII letters, digits, '-' and '_'",
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for JsonDirStorage {
    fn persist(&mut self, key: &str, record: &PatternRecord) -> Result<()> {
        let path = self.path_for(key, "persist")?;
        let json =
            serde_json::to_string_pretty(record).map_err(|e| storage_error(key, "persist", e))?;
        fs::write(&path, json).map_err(|e| storage_error(key, "persist", e))
    }

    fn retrieve(&self, key: &str) -> Result<Option<PatternRecord>> {
        let path = self.path_for(key, "retrieve")?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| storage_error(key, "retrieve", e))?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| storage_error(key, "retrieve", e))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key, "remove")?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, "remove", e)),
        }
    }

    // Files that are not `<valid key>.json` belong to someone else
    fn keys(&self) -> Result<Vec<String>> {
        let list_error = |e: std::io::Error| DesignerError::FileSystem {
            path: self.dir.clone(),
            operation: "list directory",
            source: e,
        };

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(list_error)? {
            let path = entry.map_err(list_error)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|stem| stem.to_str())
                && is_valid_key(key)
            {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
