//! Session lifecycle: loads state at startup and saves it at screen
//! transitions, after checkout, and on exit.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checkout::Bill;
use crate::error::PharmacyError;
use crate::state::{PharmacyState, RestoreReport};
use crate::store::SnapshotStore;

/// When screen transitions trigger a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AutosavePolicy {
    /// Save on every screen transition.
    #[default]
    EveryTransition,
    /// Save only after checkout and on exit.
    CheckoutAndExit,
}

impl AutosavePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutosavePolicy::EveryTransition => "every-transition",
            AutosavePolicy::CheckoutAndExit => "checkout-and-exit",
        }
    }
}

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// When screen transitions save.
    #[serde(default)]
    pub autosave: AutosavePolicy,
    /// Whether an empty cart may be billed.
    #[serde(default = "default_allow_empty_checkout")]
    pub allow_empty_checkout: bool,
}

fn default_allow_empty_checkout() -> bool {
    true
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            autosave: AutosavePolicy::default(),
            allow_empty_checkout: default_allow_empty_checkout(),
        }
    }
}

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// The autosave policy did not call for a save.
    Skipped,
    /// Storage failed; the in-memory state is still current.
    Failed(String),
}

impl SaveStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, SaveStatus::Failed(_))
    }
}

/// Result of the startup load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No snapshot yet; catalog defaults are in effect.
    FirstRun,
    Restored(RestoreReport),
    /// The snapshot could not be read; catalog defaults are in effect.
    Failed(String),
}

/// Pharmacy state bound to a snapshot store.
pub struct Session<S: SnapshotStore> {
    state: PharmacyState,
    store: S,
    options: SessionOptions,
    load_status: LoadStatus,
}

impl<S: SnapshotStore> Session<S> {
    /// Load the stored snapshot into `state` and start a session.
    ///
    /// A load failure is logged and recorded in `load_status`, not returned.
    pub fn open(mut state: PharmacyState, store: S, options: SessionOptions) -> Self {
        let load_status = match store.load() {
            Ok(Some(snapshot)) => {
                let report = state.restore(&snapshot);
                info!(
                    store = %store.describe(),
                    applied = report.applied,
                    ignored = report.unknown.len(),
                    "snapshot restored"
                );
                LoadStatus::Restored(report)
            }
            Ok(None) => {
                info!(store = %store.describe(), "no saved data found, starting with default data");
                LoadStatus::FirstRun
            }
            Err(e) => {
                warn!(store = %store.describe(), error = %e, "failed to load snapshot, starting with default data");
                LoadStatus::Failed(e.to_string())
            }
        };

        Self {
            state,
            store,
            options,
            load_status,
        }
    }

    pub fn state(&self) -> &PharmacyState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PharmacyState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Save the current state unconditionally.
    pub fn save(&mut self) -> SaveStatus {
        let snapshot = self.state.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => {
                debug!(store = %self.store.describe(), "state saved");
                SaveStatus::Saved
            }
            Err(e) => {
                warn!(store = %self.store.describe(), error = %e, "failed to save state, continuing in memory");
                SaveStatus::Failed(e.to_string())
            }
        }
    }

    /// A screen transition.
    pub fn navigate(&mut self) -> SaveStatus {
        match self.options.autosave {
            AutosavePolicy::EveryTransition => self.save(),
            AutosavePolicy::CheckoutAndExit => SaveStatus::Skipped,
        }
    }

    /// Open the charging view.
    pub fn enter_checkout(&mut self) -> SaveStatus {
        self.state.reset_cart();
        self.navigate()
    }

    /// Leave the charging view.
    pub fn leave_checkout(&mut self) -> SaveStatus {
        self.state.reset_cart();
        self.navigate()
    }

    /// Bill the cart and save.
    ///
    /// The save happens whatever the autosave policy says. A failed save
    /// does not undo the bill.
    pub fn generate_bill(&mut self) -> Result<(Bill, SaveStatus), PharmacyError> {
        let bill = self
            .state
            .generate_bill(self.options.allow_empty_checkout)?;
        let status = self.save();
        Ok((bill, status))
    }

    /// End the session with a final save.
    pub fn close(mut self) -> SaveStatus {
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Product};
    use crate::money::{Currency, Money};
    use crate::store::MemoryStore;

    fn fresh_state() -> PharmacyState {
        let catalog = Catalog::new(vec![Product::new(
            "A",
            Money::from_major(5, Currency::USD),
            2,
            "",
        )])
        .unwrap();
        PharmacyState::new(catalog)
    }

    #[test]
    fn test_open_first_run() {
        let session = Session::open(fresh_state(), MemoryStore::new(), SessionOptions::default());
        assert_eq!(session.load_status(), &LoadStatus::FirstRun);
        assert_eq!(session.state().product("A").unwrap().stock, 2);
    }

    #[test]
    fn test_open_with_unavailable_store_keeps_defaults() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let session = Session::open(fresh_state(), store, SessionOptions::default());
        assert!(matches!(session.load_status(), LoadStatus::Failed(_)));
        assert_eq!(session.state().product("A").unwrap().stock, 2);
    }

    #[test]
    fn test_navigate_respects_policy() {
        let mut session = Session::open(fresh_state(), MemoryStore::new(), SessionOptions::default());
        assert_eq!(session.navigate(), SaveStatus::Saved);
        assert_eq!(session.store().save_count(), 1);

        let options = SessionOptions {
            autosave: AutosavePolicy::CheckoutAndExit,
            ..SessionOptions::default()
        };
        let mut session = Session::open(fresh_state(), MemoryStore::new(), options);
        assert_eq!(session.navigate(), SaveStatus::Skipped);
        assert_eq!(session.enter_checkout(), SaveStatus::Skipped);
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn test_generate_bill_always_saves() {
        let options = SessionOptions {
            autosave: AutosavePolicy::CheckoutAndExit,
            ..SessionOptions::default()
        };
        let mut session = Session::open(fresh_state(), MemoryStore::new(), options);
        session.state_mut().add_to_cart("A").unwrap();

        let (bill, status) = session.generate_bill().unwrap();

        assert_eq!(bill.item_count(), 1);
        assert_eq!(status, SaveStatus::Saved);
        let saved = session.store().last().unwrap();
        assert!(saved.order_list.is_empty());
        assert_eq!(saved.products.get("A"), Some(&1));
    }

    #[test]
    fn test_empty_checkout_guard() {
        let options = SessionOptions {
            allow_empty_checkout: false,
            ..SessionOptions::default()
        };
        let mut session = Session::open(fresh_state(), MemoryStore::new(), options);
        assert_eq!(session.generate_bill().unwrap_err(), PharmacyError::EmptyCart);
        assert_eq!(session.store().save_count(), 0);
    }

    #[test]
    fn test_save_failure_is_reported_not_fatal() {
        let mut session = Session::open(fresh_state(), MemoryStore::new(), SessionOptions::default());
        session.store().set_unavailable(true);
        session.state_mut().add_to_cart("A").unwrap();

        let (bill, status) = session.generate_bill().unwrap();

        assert!(status.is_failed());
        assert_eq!(bill.item_count(), 1);
        assert!(session.state().cart().is_empty());
        assert_eq!(session.state().product("A").unwrap().stock, 1);
    }

    #[test]
    fn test_checkout_transitions_reset_quantities() {
        let mut session = Session::open(fresh_state(), MemoryStore::new(), SessionOptions::default());
        session.enter_checkout();
        session.state_mut().add_to_cart("A").unwrap();
        session.leave_checkout();

        assert_eq!(session.state().product("A").unwrap().quantity, 0);
        assert_eq!(session.state().cart().len(), 1);
    }
}
