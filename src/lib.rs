//! gptref - Manager for named custom GPT references
//!
//! Keeps an ordered list of reference entries with one selected entry,
//! persisted through a key-value storage adapter, with JSON export and import.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use application::{EntryStore, StoreEvent};
pub use domain::{Entry, EntryId, Snapshot, StoreView};
pub use error::GptRefError;
pub use infrastructure::{FileStorage, KeyValueStore, MemoryStorage, StorageKeys};
