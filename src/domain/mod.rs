//! Domain layer - Entry model, snapshots and views

pub mod entry;
pub mod snapshot;
pub mod view;

pub use entry::{Entry, EntryId, NewEntry};
pub use snapshot::Snapshot;
pub use view::{EntryView, StoreView};
