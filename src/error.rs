//! Error types for gptref

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gptref
#[derive(Debug, Error)]
pub enum GptRefError {
    #[error("Not a gptref directory: {0}")]
    NotInitialized(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Invalid import document: {0}")]
    Format(String),

    #[error("Failed to save data: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl GptRefError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GptRefError::NotInitialized(_) => 2,
            GptRefError::Validation(_) => 3,
            GptRefError::NotFound(_) => 4,
            GptRefError::Format(_) => 5,
            GptRefError::Persistence(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            GptRefError::NotInitialized(path) => {
                format!(
                    "Not a gptref directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'gptref init' in this directory to create a new workspace\n\
                    • Navigate to an existing gptref directory\n\
                    • Set GPTREF_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            GptRefError::Validation(msg) => {
                format!(
                    "{}\n\n\
                    Both a name and a reference are required.\n\
                    Example: gptref add \"Writing coach\" g-abc123 -d \"Edits drafts\"",
                    msg
                )
            }
            GptRefError::NotFound(id) => {
                format!(
                    "No entry with id '{}'\n\n\
                    Suggestions:\n\
                    • Use 'gptref list' to see the ids of stored entries\n\
                    • Ids are matched exactly, including case",
                    id
                )
            }
            GptRefError::Format(msg) => {
                format!(
                    "Invalid import document: {}\n\n\
                    Expected a JSON object with an \"entries\" array, e.g. a file\n\
                    produced by 'gptref export'. Nothing was imported.",
                    msg
                )
            }
            GptRefError::Persistence(msg) => {
                format!(
                    "Failed to save data: {}\n\n\
                    Warning: the change was applied in memory but is not on disk.\n\
                    The stored data may no longer match what was last shown.\n\
                    Check that the .gptref/storage directory is writable and retry.",
                    msg
                )
            }
            GptRefError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: gptref config entries_key myReferences",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            GptRefError::TomlDeserialize(e) => {
                format!(
                    "Failed to parse .gptref/config.toml: {}\n\n\
                    Check the file's TOML syntax and fix it by hand.",
                    e
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using GptRefError
pub type Result<T> = std::result::Result<T, GptRefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_suggestion() {
        let err = GptRefError::NotInitialized(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("gptref init"));
        assert!(msg.contains("GPTREF_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_not_found_points_to_list() {
        let err = GptRefError::NotFound("abc".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("gptref list"));
    }

    #[test]
    fn test_persistence_warns_about_divergence() {
        let err = GptRefError::Persistence("disk full".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("disk full"));
        assert!(msg.contains("applied in memory"));
    }

    #[test]
    fn test_format_mentions_entries_array() {
        let err = GptRefError::Format("missing entries".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("\"entries\""));
        assert!(msg.contains("Nothing was imported"));
    }

    #[test]
    fn test_toml_parse_error_names_config_file() {
        let parse_err = toml::from_str::<toml::Value>("not valid = = toml").unwrap_err();
        let msg = GptRefError::from(parse_err).display_with_suggestions();
        assert!(msg.contains(".gptref/config.toml"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(GptRefError::NotInitialized(PathBuf::new()).exit_code(), 2);
        assert_eq!(GptRefError::Validation(String::new()).exit_code(), 3);
        assert_eq!(GptRefError::NotFound(String::new()).exit_code(), 4);
        assert_eq!(GptRefError::Format(String::new()).exit_code(), 5);
        assert_eq!(GptRefError::Persistence(String::new()).exit_code(), 6);
        assert_eq!(GptRefError::Config(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = GptRefError::Config("Config broken".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Config broken");
    }
}
