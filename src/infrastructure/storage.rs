//! Key-value storage adapters

use crate::error::{GptRefError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default key for the serialized entry array
pub const DEFAULT_ENTRIES_KEY: &str = "customGPTReferences";

/// Default key for the selected entry id
pub const DEFAULT_SELECTED_KEY: &str = "selectedGPTId";

/// String key-value storage the entry store persists through
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if there is none
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The two storage keys used by the entry store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub entries: String,
    pub selected: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            entries: DEFAULT_ENTRIES_KEY.to_string(),
            selected: DEFAULT_SELECTED_KEY.to_string(),
        }
    }
}

/// Check that a key can be used as a storage file name
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Directory-backed storage: one file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(GptRefError::Config(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GptRefError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        // Write beside the target, then rename over it
        let tmp_path = self.dir.join(format!(".{}.tmp", key));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to seed a value
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("customGPTReferences"));
        assert!(is_valid_key("my-refs_v2.json"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key(".hidden"));
        assert!(!is_valid_key("../escape"));
        assert!(!is_valid_key("with space"));
    }

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().join("storage"));
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_and_get() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().join("storage"));

        storage.set("key", "first").unwrap();
        storage.set("key", "second").unwrap();

        assert_eq!(storage.get("key").unwrap(), Some("second".to_string()));
        assert!(temp.path().join("storage/key").exists());
        assert!(!temp.path().join("storage/.key.tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf());
        assert!(storage.set("../outside", "x").is_err());
        assert!(storage.get("a/b").is_err());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new().with_value("a", "1");
        assert_eq!(storage.get("a").unwrap(), Some("1".to_string()));
        storage.set("b", "2").unwrap();
        assert_eq!(storage.get("b").unwrap(), Some("2".to_string()));
        assert_eq!(storage.get("c").unwrap(), None);
    }
}
