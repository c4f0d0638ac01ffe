//! Config management use case

use crate::error::{GptRefError, Result};
use crate::infrastructure::storage::is_valid_key;
use crate::infrastructure::{Config, Workspace};

/// Keys accepted by `get`
pub const CONFIG_KEYS: &[&str] = &["entries_key", "selected_key", "created"];

/// Service for managing workspace configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;

        match key {
            "entries_key" => Ok(config.entries_key),
            "selected_key" => Ok(config.selected_key),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(GptRefError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key,
                CONFIG_KEYS.join(", ")
            ))),
        }
    }

    /// Set a config value.
    ///
    /// Storage keys must be usable as file names and must differ from each
    /// other, otherwise entries and selection would overwrite one another.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;
        let value = value.trim();

        match key {
            "entries_key" | "selected_key" => {
                if !is_valid_key(value) {
                    return Err(GptRefError::Config(format!(
                        "Invalid storage key: '{}'. Use letters, digits, '-', '_' or '.'",
                        value
                    )));
                }
                if key == "entries_key" {
                    config.entries_key = value.to_string();
                } else {
                    config.selected_key = value.to_string();
                }
                if config.entries_key == config.selected_key {
                    return Err(GptRefError::Config(
                        "entries_key and selected_key must be different".to_string(),
                    ));
                }
            }
            "created" => {
                return Err(GptRefError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(GptRefError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: entries_key, selected_key",
                    key
                )));
            }
        }

        self.workspace.save_config(&config)
    }

    /// All config values
    pub fn list(&self) -> Result<Config> {
        self.workspace.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        let workspace = init(temp.path()).unwrap();
        (temp, ConfigService::new(workspace))
    }

    #[test]
    fn test_get_defaults() {
        let (_temp, service) = service();
        assert_eq!(service.get("entries_key").unwrap(), "customGPTReferences");
        assert_eq!(service.get("selected_key").unwrap(), "selectedGPTId");
        assert!(!service.get("created").unwrap().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let (_temp, service) = service();
        service.set("entries_key", " work-refs ").unwrap();
        assert_eq!(service.get("entries_key").unwrap(), "work-refs");
        assert_eq!(service.list().unwrap().entries_key, "work-refs");
    }

    #[test]
    fn test_set_rejects_invalid_key_value() {
        let (_temp, service) = service();
        assert!(service.set("entries_key", "../x").is_err());
        assert!(service.set("selected_key", "").is_err());
        assert_eq!(service.get("entries_key").unwrap(), "customGPTReferences");
    }

    #[test]
    fn test_set_rejects_identical_keys() {
        let (_temp, service) = service();
        let err = service.set("selected_key", "customGPTReferences").unwrap_err();
        assert!(err.to_string().contains("must be different"));
        assert_eq!(service.get("selected_key").unwrap(), "selectedGPTId");
    }

    #[test]
    fn test_created_is_read_only() {
        let (_temp, service) = service();
        let err = service.set("created", "2025-01-01T00:00:00Z").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_unknown_key() {
        let (_temp, service) = service();
        let err = service.get("colour").unwrap_err();
        assert!(err.to_string().contains("Unknown config key: 'colour'"));
    }
}
