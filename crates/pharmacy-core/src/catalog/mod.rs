//! Product catalog module.
//!
//! Contains the product record, the fixed catalog, the built-in product
//! list, and stock adjustment records.

mod builtin;
#[allow(clippy::module_inception)]
mod catalog;
mod inventory;
mod product;

pub use builtin::{builtin_catalog, builtin_products};
pub use catalog::Catalog;
pub use inventory::{AdjustmentReason, StockAdjustment};
pub use product::Product;
