//! Inventory, cart and billing state for a small pharmacy point of sale.
//!
//! - **Catalog**: fixed product list with prices, stock and descriptions
//! - **Cart**: units queued for billing with a running total
//! - **Checkout**: bills generated from the cart
//! - **Store**: snapshot persistence
//! - **Session**: load/save at the lifecycle points of a front end
//!
//! # Example
//!
//! ```rust
//! use pharmacy_core::prelude::*;
//!
//! let catalog = builtin_catalog(Currency::USD).unwrap();
//! let mut session = Session::open(
//!     PharmacyState::new(catalog),
//!     MemoryStore::new(),
//!     SessionOptions::default(),
//! );
//!
//! session.enter_checkout();
//! session.state_mut().add_to_cart("Paracetamol").unwrap();
//! let (bill, _saved) = session.generate_bill().unwrap();
//! assert_eq!(bill.total.display(), "$10.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod state;
pub mod store;

pub use error::PharmacyError;
pub use ids::{BillId, ProductName};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::PharmacyError;
    pub use crate::ids::{BillId, ProductName};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        builtin_catalog, builtin_products, AdjustmentReason, Catalog, Product, StockAdjustment,
    };

    // Cart and checkout
    pub use crate::cart::{Cart, CartEntry};
    pub use crate::checkout::{Bill, BillItem, BillLine};

    // State and persistence
    pub use crate::session::{AutosavePolicy, LoadStatus, SaveStatus, Session, SessionOptions};
    pub use crate::state::{InventoryObserver, PharmacyState, RestoreReport};
    pub use crate::store::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore};
}
