//! Configuration management

use crate::error::{GptRefError, Result};
use crate::infrastructure::storage::{StorageKeys, DEFAULT_ENTRIES_KEY, DEFAULT_SELECTED_KEY};
use crate::infrastructure::workspace::{CONFIG_FILE, WORKSPACE_DIR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_entries_key")]
    pub entries_key: String,
    #[serde(default = "default_selected_key")]
    pub selected_key: String,
    pub created: DateTime<Utc>,
}

fn default_entries_key() -> String {
    DEFAULT_ENTRIES_KEY.to_string()
}

fn default_selected_key() -> String {
    DEFAULT_SELECTED_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            entries_key: default_entries_key(),
            selected_key: default_selected_key(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .gptref/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(WORKSPACE_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GptRefError::NotInitialized(path.to_path_buf())
            } else {
                GptRefError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .gptref/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let workspace_dir = path.join(WORKSPACE_DIR);
        let config_path = workspace_dir.join(CONFIG_FILE);

        if !workspace_dir.exists() {
            fs::create_dir(&workspace_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Storage keys the entry store should use
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            entries: self.entries_key.clone(),
            selected: self.selected_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.entries_key, "customGPTReferences");
        assert_eq!(config.selected_key, "selectedGPTId");
        assert_eq!(config.storage_keys(), StorageKeys::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.entries_key = "refs".to_string();

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".gptref").exists());
        assert!(temp.path().join(".gptref/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.entries_key, "refs");
        assert_eq!(loaded.selected_key, config.selected_key);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".gptref")).unwrap();
        fs::write(
            temp.path().join(".gptref/config.toml"),
            "created = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.entries_key, DEFAULT_ENTRIES_KEY);
        assert_eq!(loaded.selected_key, DEFAULT_SELECTED_KEY);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            GptRefError::NotInitialized(_) => {}
            other => panic!("Expected NotInitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_corrupt_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".gptref")).unwrap();
        fs::write(temp.path().join(".gptref/config.toml"), "not = [valid").unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, GptRefError::TomlDeserialize(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
