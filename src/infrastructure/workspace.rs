//! Workspace discovery and on-disk layout

use crate::error::{GptRefError, Result};
use crate::infrastructure::{Config, FileStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker directory of a workspace
pub const WORKSPACE_DIR: &str = ".gptref";

/// Config file inside the marker directory
pub const CONFIG_FILE: &str = "config.toml";

/// Storage directory inside the marker directory
pub const STORAGE_DIR: &str = "storage";

/// Environment variable that pins the workspace root
pub const ROOT_ENV_VAR: &str = "GPTREF_ROOT";

/// A directory holding a `.gptref` workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Find the workspace root.
    /// Checks GPTREF_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(Workspace::new(path));
            } else {
                return Err(GptRefError::Config(format!(
                    "{} is set to '{}' but no {} directory found. \
                    Run 'gptref init' in that directory or unset {}.",
                    ROOT_ENV_VAR,
                    path.display(),
                    WORKSPACE_DIR,
                    ROOT_ENV_VAR
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing `.gptref` is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(GptRefError::NotInitialized(start.to_path_buf())),
            }
        }
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    /// Create the `.gptref` directory structure
    pub fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(GptRefError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&workspace_dir)?;
        fs::create_dir(workspace_dir.join(STORAGE_DIR))?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    /// Storage adapter rooted in this workspace
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.root.join(WORKSPACE_DIR).join(STORAGE_DIR))
    }
}
