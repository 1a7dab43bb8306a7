//! Persistence gateway.
//!
//! A [`SnapshotStore`] reads and writes a whole [`Snapshot`] at once. The
//! last full save wins; there is no partial update.

mod file;
mod memory;
mod snapshot;

pub use file::{JsonFileStore, DEFAULT_SNAPSHOT_FILE};
pub use memory::MemoryStore;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use crate::error::PharmacyError;

/// Storage for pharmacy snapshots.
pub trait SnapshotStore {
    /// Read the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, PharmacyError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PharmacyError>;

    /// Where snapshots go, for log and status output.
    fn describe(&self) -> String;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<Snapshot>, PharmacyError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PharmacyError> {
        (**self).save(snapshot)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
