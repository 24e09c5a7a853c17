//! JSON-file key-value store.
//!
//! The whole store is one JSON object of string values. Every write rewrites the file
//! through a temporary sibling and a rename.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use clinic_calendar_core::storage::{KeyValueStore, Result, StoreError};

/// File-backed store; a missing file reads as an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(io_error(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::InvalidData(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_map(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
        }
        let raw = serde_json::to_string_pretty(values)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| io_error(&tmp, &e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, &e))
    }
}

fn io_error(path: &Path, error: &std::io::Error) -> StoreError {
    StoreError::Io(format!("{}: {}", path.display(), error))
}

fn poisoned() -> StoreError {
    StoreError::Io("store lock poisoned".to_string())
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.read().map_err(|_| poisoned())?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.write().map_err(|_| poisoned())?;
        let mut values = self.read_map()?;
        values.insert(key.to_string(), value.to_string());
        self.write_map(&values)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.write().map_err(|_| poisoned())?;
        let mut values = self.read_map()?;
        if values.remove(key).is_some() {
            self.write_map(&values)?;
        }
        Ok(())
    }
}
