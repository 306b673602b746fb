//! Key/value backends for the session store.
//!
//! Values are strings, the same shape browser local storage offers. Writes are
//! batched so a reader never sees half of a session.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

pub trait Storage: Send + Sync {
    /// Read a single key.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write all entries in one step.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;

    /// Remove all keys in one step. Missing keys are ignored.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Short backend name for health reporting.
    fn kind(&self) -> &'static str;
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, new_entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        for (key, value) in new_entries {
            entries.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// JSON object persisted in a single file.
///
/// Every write replaces the file through a rename, so the file on disk is
/// always a complete object.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    // A corrupt file is replaced on the next write rather than merged.
    fn read_entries_or_reset(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_entries() {
            Err(StorageError::Corrupt { .. }) => Ok(BTreeMap::new()),
            other => other,
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp, &self.path).map_err(|err| self.io_error(err))?;

        debug!("wrote {} session fields to {}", entries.len(), self.path.display());

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn set_many(&self, new_entries: &[(&str, String)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries_or_reset()?;
        for (key, value) in new_entries {
            entries.insert((*key).to_string(), value.clone());
        }
        self.write_entries(&entries)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.read_entries_or_reset()?;
        if !self.path.exists() && entries.is_empty() {
            return Ok(());
        }
        for key in keys {
            entries.remove(*key);
        }
        self.write_entries(&entries)
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("a").ok().flatten(), None);

        storage
            .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .expect("set");
        assert_eq!(storage.get("a").ok().flatten(), Some("1".to_string()));

        storage.remove_many(&["a", "missing"]).expect("remove");
        assert_eq!(storage.get("a").ok().flatten(), None);
        assert_eq!(storage.get("b").ok().flatten(), Some("2".to_string()));
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("session.json"));
        assert_eq!(storage.get("subjectId").ok().flatten(), None);
        storage.remove_many(&["subjectId"]).expect("remove");
        assert!(!storage.path().exists());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");

        FileStorage::new(&path)
            .set_many(&[("subjectId", "admin".to_string())])
            .expect("set");

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("subjectId").ok().flatten(),
            Some("admin".to_string())
        );

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
    }

    #[test]
    fn file_storage_reports_corruption() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]").expect("write");

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("subjectId"),
            Err(StorageError::Corrupt { .. })
        ));

        // Writing over a corrupt file recovers it.
        storage
            .set_many(&[("subjectId", "manager".to_string())])
            .expect("set");
        assert_eq!(
            storage.get("subjectId").ok().flatten(),
            Some("manager".to_string())
        );
    }

    #[test]
    fn file_storage_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage
            .set_many(&[("subjectId", "x".to_string()), ("theme", "dark".to_string())])
            .expect("set");
        storage.remove_many(&["subjectId"]).expect("remove");
        assert_eq!(storage.get("subjectId").ok().flatten(), None);
        assert_eq!(storage.get("theme").ok().flatten(), Some("dark".to_string()));
    }
}
