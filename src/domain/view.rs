//! Read-only projection of store state for display.
//!
//! The view carries plain structured data. Escaping is the job of whatever
//! renders it, so user text is never spliced into markup here.

use crate::domain::{Entry, EntryId};
use chrono::NaiveDate;

/// One entry as it should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: String,
    pub name: String,
    pub reference: String,
    pub description: Option<String>,
    pub added_on: NaiveDate,
    pub is_selected: bool,
}

/// Everything a front end needs to redraw after a change
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreView {
    pub items: Vec<EntryView>,
    pub selected: Option<EntryView>,
    pub count: usize,
}

impl StoreView {
    /// Project entries and the current selection into a view
    pub fn project(entries: &[Entry], selected_id: Option<&EntryId>) -> Self {
        let items: Vec<EntryView> = entries
            .iter()
            .map(|entry| EntryView::from_entry(entry, Some(&entry.id) == selected_id))
            .collect();
        let selected = items.iter().find(|item| item.is_selected).cloned();

        StoreView {
            count: items.len(),
            items,
            selected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl EntryView {
    fn from_entry(entry: &Entry, is_selected: bool) -> Self {
        EntryView {
            id: entry.id.to_string(),
            name: entry.name.clone(),
            reference: entry.reference.clone(),
            description: entry.description().map(str::to_string),
            added_on: entry.created_at.date_naive(),
            is_selected,
        }
    }
}
