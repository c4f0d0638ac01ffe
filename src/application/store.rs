//! Entry store: the in-memory collection, its selection and their persistence.
//!
//! Mutations apply in memory first, then write through to storage. A failed
//! write is reported as `Persistence` but the in-memory change is kept, so the
//! caller must warn that storage is out of date. Reading is fail-soft: corrupt
//! or unreadable storage loads as an empty store.

use crate::domain::snapshot::check_entries;
use crate::domain::{Entry, EntryId, NewEntry, Snapshot, StoreView};
use crate::error::{GptRefError, Result};
use crate::infrastructure::{KeyValueStore, StorageKeys};
use chrono::Utc;
use log::{debug, error, warn};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};

/// Change notification sent to subscribers after each state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(EntryId),
    Removed(EntryId),
    Selected(EntryId),
    Imported { count: usize },
    Loaded { count: usize },
}

/// Ordered entry collection with one optional selection, backed by storage
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    keys: StorageKeys,
    entries: Vec<Entry>,
    selected_id: Option<EntryId>,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Create an empty store without reading storage
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        EntryStore {
            storage,
            keys,
            entries: Vec::new(),
            selected_id: None,
            subscribers: Vec::new(),
        }
    }

    /// Create a store and rehydrate it from storage
    pub fn open(storage: S, keys: StorageKeys) -> Self {
        let mut store = Self::new(storage, keys);
        store.load();
        store
    }

    /// Register for change notifications.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Validate and append a new entry, then persist.
    ///
    /// A `Validation` error leaves the store untouched. A `Persistence` error
    /// means the entry was added in memory but not saved.
    pub fn add(&mut self, name: &str, reference: &str, description: &str) -> Result<Entry> {
        let entry = NewEntry::new(name, reference, description).into_entry(Utc::now())?;

        self.entries.push(entry.clone());
        debug!(
            "event=entry_added id={} count={}",
            entry.id,
            self.entries.len()
        );

        self.commit(StoreEvent::Added(entry.id.clone()))?;
        Ok(entry)
    }

    /// Remove an entry by id, clearing the selection if it pointed there.
    ///
    /// Unknown ids are a no-op and do not touch storage.
    pub fn remove(&mut self, id: &EntryId) -> Result<Option<Entry>> {
        let Some(index) = self.entries.iter().position(|entry| &entry.id == id) else {
            debug!("event=entry_remove_skipped id={} reason=not_found", id);
            return Ok(None);
        };

        let removed = self.entries.remove(index);
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
        debug!(
            "event=entry_removed id={} count={}",
            id,
            self.entries.len()
        );

        self.commit(StoreEvent::Removed(removed.id.clone()))?;
        Ok(Some(removed))
    }

    /// Mark an existing entry as selected, then persist
    pub fn select(&mut self, id: &EntryId) -> Result<()> {
        if self.find(id).is_none() {
            return Err(GptRefError::NotFound(id.to_string()));
        }

        self.selected_id = Some(id.clone());
        debug!("event=entry_selected id={}", id);

        self.commit(StoreEvent::Selected(id.clone()))
    }

    /// Entries in insertion order
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// The selected entry, if the selection points at an existing one
    pub fn selected(&self) -> Option<&Entry> {
        self.selected_id.as_ref().and_then(|id| self.find(id))
    }

    /// Projection of the current state for display
    pub fn view(&self) -> StoreView {
        StoreView::project(&self.entries, self.selected_id.as_ref())
    }

    /// Full snapshot of the current state, stamped with the export time
    pub fn export(&self) -> Snapshot {
        Snapshot {
            entries: self.entries.clone(),
            selected_id: self.selected_id.clone(),
            exported_at: Some(Utc::now()),
        }
    }

    /// Replace the whole state with the contents of a snapshot document.
    ///
    /// Nothing is merged: entries and selection both come from the document.
    /// A `Format` error leaves the store untouched.
    pub fn import(&mut self, document: &Value) -> Result<()> {
        let snapshot = Snapshot::from_value(document)?;

        self.entries = snapshot.entries;
        self.selected_id = snapshot.selected_id;
        debug!(
            "event=snapshot_imported count={} selected={}",
            self.entries.len(),
            self.selected_id.is_some()
        );

        self.commit(StoreEvent::Imported {
            count: self.entries.len(),
        })
    }

    /// Write the entry array and the selected id to storage.
    ///
    /// With a selection, entries are written first so the stored id names a
    /// stored entry. Without one, the cleared selection is written first so a
    /// failed entries write never leaves a selection pointing at stale data.
    pub fn persist(&mut self) -> Result<()> {
        let entries_json = serde_json::to_string(&self.entries)?;
        let selected = self.selected_id.as_ref().map(EntryId::as_str).unwrap_or("");

        let writes = if selected.is_empty() {
            [
                (&self.keys.selected, selected),
                (&self.keys.entries, entries_json.as_str()),
            ]
        } else {
            [
                (&self.keys.entries, entries_json.as_str()),
                (&self.keys.selected, selected),
            ]
        };

        for (key, value) in writes {
            if let Err(e) = self.storage.set(key, value) {
                error!("event=persist_failed key={} error={}", key, e);
                return Err(GptRefError::Persistence(e.to_string()));
            }
        }
        Ok(())
    }

    /// Rehydrate from storage.
    ///
    /// Any read or decode failure resets the store to empty instead of
    /// returning an error. A selection that names no entry is dropped.
    pub fn load(&mut self) {
        match self.read_persisted() {
            Ok((entries, selected_id)) => {
                self.entries = entries;
                self.selected_id = selected_id;
            }
            Err(e) => {
                warn!("event=load_reset reason=unreadable_storage error={}", e);
                self.entries.clear();
                self.selected_id = None;
            }
        }

        if self.selected_id.is_some() && self.selected().is_none() {
            warn!("event=load_selection_dropped reason=dangling_id");
            self.selected_id = None;
        }

        debug!("event=store_loaded count={}", self.entries.len());
        self.emit(StoreEvent::Loaded {
            count: self.entries.len(),
        });
    }

    /// Storage adapter backing this store
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_persisted(&self) -> Result<(Vec<Entry>, Option<EntryId>)> {
        let entries: Vec<Entry> = match self.storage.get(&self.keys.entries)? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };

        check_entries(&entries)?;

        let selected_id = self
            .storage
            .get(&self.keys.selected)?
            .filter(|id| !id.is_empty())
            .map(EntryId::from);

        Ok((entries, selected_id))
    }

    /// Persist, then notify subscribers whether or not the write succeeded,
    /// since the in-memory state has changed either way.
    fn commit(&mut self, event: StoreEvent) -> Result<()> {
        let result = self.persist();
        self.emit(event);
        result
    }

    fn emit(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
