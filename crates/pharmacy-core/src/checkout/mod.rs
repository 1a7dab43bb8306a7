//! Checkout module.
//!
//! Contains the bill produced when the cart is charged.

mod bill;

pub use bill::{Bill, BillItem, BillLine};
