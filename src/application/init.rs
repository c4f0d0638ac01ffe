//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, Workspace};
use log::info;
use std::fs;
use std::path::Path;

/// Initialize a new workspace at the specified path.
pub fn init(path: &Path) -> Result<Workspace> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let workspace = Workspace::new(path.to_path_buf());
    workspace.initialize()?;

    let config = Config::default();
    workspace.save_config(&config)?;

    info!("event=workspace_init path={}", path.display());
    Ok(workspace)
}
