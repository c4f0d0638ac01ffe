//! Reference entry model
//!
//! Entries are immutable once created: the store only appends and removes them.

use crate::error::{GptRefError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, unique identifier of an entry.
///
/// New ids are UUID v4 strings. Ids read back from storage or imported from a
/// document are kept verbatim, whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named reference record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Check the invariants `NewEntry::validate` enforces on new entries,
    /// plus a non-empty id. Used on entries read back from storage or imports.
    pub fn check(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(GptRefError::Validation("entry id is empty".to_string()));
        }
        NewEntry::new(self.name.as_str(), self.reference.as_str(), "")
            .validate()
            .map(|_| ())
    }

    /// Returns the description, or `None` when it is empty
    pub fn description(&self) -> Option<&str> {
        if self.description.is_empty() {
            None
        } else {
            Some(&self.description)
        }
    }
}

/// User input for a new entry, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub reference: String,
    pub description: String,
}

impl NewEntry {
    pub fn new(
        name: impl Into<String>,
        reference: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        NewEntry {
            name: name.into(),
            reference: reference.into(),
            description: description.into(),
        }
    }

    /// Trim all fields and check the required ones.
    ///
    /// Returns a `Validation` error naming every missing field.
    pub fn validate(&self) -> Result<NewEntry> {
        let name = self.name.trim();
        let reference = self.reference.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if reference.is_empty() {
            missing.push("reference");
        }
        if !missing.is_empty() {
            return Err(GptRefError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        Ok(NewEntry {
            name: name.to_string(),
            reference: reference.to_string(),
            description: self.description.trim().to_string(),
        })
    }

    /// Validate and turn into an entry with a fresh id
    pub fn into_entry(self, created_at: DateTime<Utc>) -> Result<Entry> {
        let valid = self.validate()?;
        Ok(Entry {
            id: EntryId::generate(),
            name: valid.name,
            reference: valid.reference,
            description: valid.description,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_trims_fields() {
        let input = NewEntry::new("  Coach ", "\tg-123\n", "  edits drafts ");
        let valid = input.validate().unwrap();
        assert_eq!(valid.name, "Coach");
        assert_eq!(valid.reference, "g-123");
        assert_eq!(valid.description, "edits drafts");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = NewEntry::new("   ", "g-123", "").validate().unwrap_err();
        match err {
            GptRefError::Validation(msg) => {
                assert!(msg.contains("name"));
                assert!(!msg.contains("reference"));
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_reports_both_missing_fields() {
        let err = NewEntry::default().validate().unwrap_err();
        assert!(err.to_string().contains("name, reference"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    fn stored(id: &str, name: &str, reference: &str) -> Entry {
        Entry {
            id: EntryId::from(id),
            name: name.to_string(),
            reference: reference.to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 17, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_check_accepts_valid_entry() {
        assert!(stored("a", "Coach", "g-1").check().is_ok());
    }

    #[test]
    fn test_check_rejects_blank_fields() {
        let err = stored("a", "   ", "").check().unwrap_err();
        assert!(err.to_string().contains("name, reference"));
    }

    #[test]
    fn test_check_rejects_empty_id() {
        let err = stored("", "Coach", "g-1").check().unwrap_err();
        assert!(err.to_string().contains("entry id is empty"));
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = Entry {
            id: EntryId::from("abc"),
            name: "Coach".to_string(),
            reference: "g-123".to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 17, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["ref"], "g-123");
        assert_eq!(json["createdAt"], "2025-01-17T10:00:00Z");
        assert!(json.get("reference").is_none());
    }

    #[test]
    fn test_entry_accepts_browser_timestamps_and_missing_description() {
        let json = r#"{"id":"lq2x9k0abc","name":"A","ref":"R","createdAt":"2024-11-02T08:15:30.123Z"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_str(), "lq2x9k0abc");
        assert_eq!(entry.description(), None);
    }
}
