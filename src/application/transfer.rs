//! Export to and import from JSON snapshot files

use crate::application::EntryStore;
use crate::domain::Snapshot;
use crate::error::{GptRefError, Result};
use crate::infrastructure::KeyValueStore;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when exporting into a directory
pub fn export_file_name(millis: i64) -> String {
    format!("custom-gpt-refs-{}.json", millis)
}

/// Write a pretty-printed snapshot of the store.
///
/// If `target` is an existing directory, a timestamped file is created inside
/// it; otherwise `target` is used as the file path. Returns the written path.
pub fn export_to_file<S: KeyValueStore>(store: &EntryStore<S>, target: &Path) -> Result<PathBuf> {
    let snapshot = store.export();
    let path = if target.is_dir() {
        let millis = snapshot.exported_at.unwrap_or_else(Utc::now).timestamp_millis();
        target.join(export_file_name(millis))
    } else {
        target.to_path_buf()
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&path, snapshot.to_json_pretty()?)?;
    Ok(path)
}

/// Read a snapshot document from disk and replace the store's state with it.
///
/// Returns the number of imported entries.
pub fn import_from_file<S: KeyValueStore>(store: &mut EntryStore<S>, path: &Path) -> Result<usize> {
    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text)
        .map_err(|e| GptRefError::Format(format!("not valid JSON: {}", e)))?;

    store.import(&document)?;
    Ok(store.len())
}

/// Read and validate a snapshot file without touching any store
pub fn read_snapshot_file(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)?;
    Snapshot::parse(&text)
}
