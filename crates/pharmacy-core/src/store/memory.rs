//! In-memory snapshot store.

use std::cell::{Cell, RefCell};

use crate::error::PharmacyError;
use crate::store::{Snapshot, SnapshotStore};

/// Keeps the last saved snapshot in memory.
///
/// Used when persistence is disabled and in tests. `set_unavailable(true)`
/// makes every load and save fail, which stands in for a missing disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<Snapshot>>,
    saves: Cell<usize>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already stored.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// The last saved snapshot.
    pub fn last(&self) -> Option<Snapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check_available(&self) -> Result<(), PharmacyError> {
        if self.unavailable.get() {
            return Err(PharmacyError::Io("storage unavailable".to_string()));
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, PharmacyError> {
        self.check_available()?;
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PharmacyError> {
        self.check_available()?;
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_counts_and_replaces() {
        let store = MemoryStore::new();
        store.save(&Snapshot::default_for_tests()).unwrap();
        store.save(&Snapshot::default_for_tests()).unwrap();
        assert_eq!(store.save_count(), 2);
        assert!(store.last().is_some());
    }

    #[test]
    fn test_unavailable_store_fails() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.load(), Err(PharmacyError::Io(_))));
        assert!(store.save(&Snapshot::default_for_tests()).is_err());
        assert_eq!(store.save_count(), 0);
    }

    impl Snapshot {
        fn default_for_tests() -> Self {
            serde_json::from_str("{}").unwrap()
        }
    }
}
