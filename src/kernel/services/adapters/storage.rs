//! Key-value storage adapters.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{Storage, StorageError};

type Namespaces = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<FxHashMap<(String, String), String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, namespace: &str, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, namespace: &str, key: &str, default: &str) -> String {
        self.raw(namespace, key)
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}

/// One JSON document holding every namespace, rewritten on each `set`.
pub struct JsonFileStorage {
    path: PathBuf,
    namespaces: RefCell<Namespaces>,
}

impl JsonFileStorage {
    /// A missing file starts empty; so does a corrupt one, after a warning.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let namespaces = match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Namespaces>(&data) {
                Ok(namespaces) => namespaces,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "discarding corrupt state file");
                    Namespaces::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Namespaces::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };
        Ok(Self {
            path,
            namespaces: RefCell::new(namespaces),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&*self.namespaces.borrow())?;
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, namespace: &str, key: &str, default: &str) -> String {
        self.namespaces
            .borrow()
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), StorageError> {
        self.namespaces
            .borrow_mut()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/storage.rs"]
mod tests;
