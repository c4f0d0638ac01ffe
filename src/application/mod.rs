//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod store;
pub mod transfer;

pub use manage_config::ConfigService;
pub use store::{EntryStore, StoreEvent};
pub use transfer::{export_to_file, import_from_file, read_snapshot_file};
