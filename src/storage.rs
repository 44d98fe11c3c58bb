//! Client-local key/value storage
//!
//! Holds the credentials and the profile of the logged in user between invocations. The
//! [`FileStore`] keeps everything in a single JSON object on disk.
use displaydoc::Display;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Keys of the values kept in the client storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StorageKey {
    /// access_token
    AccessToken,
    /// refresh_token
    RefreshToken,
    /// user
    User,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access storage file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Storage file {path} is not a valid JSON object: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub trait KeyValueStore {
    fn get(&self, key: StorageKey) -> Option<String>;

    fn set(&mut self, key: StorageKey, value: String) -> Result<()>;

    fn remove(&mut self, key: StorageKey) -> Result<()>;

    /// Removes every stored value
    fn clear(&mut self) -> Result<()>;
}

/// Storage that lives only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.entries.get(&key.to_string()).cloned()
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        self.entries.remove(&key.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Storage persisted as a JSON object in a file
///
/// Every modification is written through to disk immediately.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, a missing file is treated as an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StorageError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        Ok(FileStore { path, entries })
    }

    /// Applies `change` to a copy of the entries and keeps it once it is on disk
    fn update<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.clone();
        change(&mut entries);

        self.persist(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        std::fs::write(&self.path, content).map_err(io_error)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.entries.get(&key.to_string()).cloned()
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        if !self.entries.contains_key(&key.to_string()) {
            return Ok(());
        }

        self.update(|entries| {
            entries.remove(&key.to_string());
        })
    }

    fn clear(&mut self) -> Result<()> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(StorageKey::AccessToken.to_string(), "access_token");
        assert_eq!(StorageKey::RefreshToken.to_string(), "refresh_token");
        assert_eq!(StorageKey::User.to_string(), "user");
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(StorageKey::AccessToken), None);

        store
            .set(StorageKey::AccessToken, "secret".to_string())
            .unwrap();
        store.set(StorageKey::User, "{}".to_string()).unwrap();

        let mut reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(StorageKey::AccessToken).as_deref(),
            Some("secret")
        );

        reopened.clear().unwrap();

        let cleared = FileStore::open(&path).unwrap();
        assert_eq!(cleared.get(StorageKey::AccessToken), None);
        assert_eq!(cleared.get(StorageKey::User), None);
    }

    #[test]
    fn failed_write_keeps_the_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store
            .set(StorageKey::AccessToken, "secret".to_string())
            .unwrap();

        // a directory in place of the file makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            store.set(StorageKey::User, "{}".to_string()),
            Err(StorageError::Io { .. })
        ));
        assert!(store.clear().is_err());

        assert_eq!(store.get(StorageKey::User), None);
        assert_eq!(store.get(StorageKey::AccessToken).as_deref(), Some("secret"));
    }

    #[test]
    fn corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Json { .. })
        ));
    }

    #[test]
    fn memory_store_remove() {
        let mut store = MemoryStore::default();
        store
            .set(StorageKey::RefreshToken, "refresh".to_string())
            .unwrap();
        store.remove(StorageKey::RefreshToken).unwrap();

        assert_eq!(store.get(StorageKey::RefreshToken), None);
    }
}
