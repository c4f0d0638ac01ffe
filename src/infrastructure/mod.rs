//! Infrastructure layer - Storage adapters, config and workspace layout

pub mod config;
pub mod storage;
pub mod workspace;

pub use config::Config;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageKeys};
pub use workspace::Workspace;
