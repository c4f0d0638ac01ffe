//! Snapshot of the full store state, as exported and imported

use crate::domain::{Entry, EntryId};
use crate::error::{GptRefError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Key holding the entry array in a snapshot document
pub const ENTRIES_FIELD: &str = "entries";

/// Older exports stored the entries under this key
const LEGACY_ENTRIES_FIELD: &str = "gpts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub selected_id: Option<EntryId>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(entries: Vec<Entry>, selected_id: Option<EntryId>) -> Self {
        Snapshot {
            entries,
            selected_id,
            exported_at: None,
        }
    }

    /// Parse and validate a snapshot document.
    ///
    /// Fails with `Format` when the document has no entry array, when an entry
    /// is malformed or breaks an entry invariant, or when two entries share an
    /// id. A selection that is
    /// empty or does not name one of the entries is dropped.
    pub fn from_value(document: &Value) -> Result<Snapshot> {
        let object = document
            .as_object()
            .ok_or_else(|| GptRefError::Format("document is not a JSON object".to_string()))?;

        let raw_entries = object
            .get(ENTRIES_FIELD)
            .or_else(|| object.get(LEGACY_ENTRIES_FIELD))
            .filter(|value| value.is_array())
            .ok_or_else(|| {
                GptRefError::Format(format!("document has no \"{}\" array", ENTRIES_FIELD))
            })?;

        let entries: Vec<Entry> = serde_json::from_value(raw_entries.clone())
            .map_err(|e| GptRefError::Format(format!("malformed entry: {}", e)))?;

        check_entries(&entries)?;

        let selected_id = object
            .get("selectedId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(EntryId::from);

        let exported_at = object
            .get("exportedAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let mut snapshot = Snapshot {
            entries,
            selected_id,
            exported_at,
        };
        snapshot.drop_dangling_selection();
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn parse(text: &str) -> Result<Snapshot> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| GptRefError::Format(format!("not valid JSON: {}", e)))?;
        Self::from_value(&document)
    }

    /// Serialize as pretty-printed JSON, the export file format
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clear the selection if it does not reference one of the entries
    pub fn drop_dangling_selection(&mut self) {
        let dangling = match &self.selected_id {
            Some(id) => !self.entries.iter().any(|entry| &entry.id == id),
            None => false,
        };
        if dangling {
            self.selected_id = None;
        }
    }
}

/// Check every entry's invariants and id uniqueness.
///
/// Failures are reported as `Format` errors naming the entry's position.
pub fn check_entries(entries: &[Entry]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        entry
            .check()
            .map_err(|e| GptRefError::Format(format!("entry {}: {}", index, e)))?;
    }

    if let Some(id) = first_duplicate_id(entries) {
        return Err(GptRefError::Format(format!("duplicate entry id: {}", id)));
    }
    Ok(())
}

/// Returns the first id that occurs more than once, if any
pub fn first_duplicate_id(entries: &[Entry]) -> Option<&EntryId> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| &entry.id)
        .find(|id| !seen.insert(*id))
}
