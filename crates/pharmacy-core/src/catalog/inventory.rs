//! Stock adjustment records delivered to inventory observers.

use crate::ids::ProductName;
use serde::{Deserialize, Serialize};

/// Reason for a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentReason {
    /// Unit added to stock by the operator.
    Restock,
    /// Unit taken out of stock by the operator.
    Correction,
    /// Unit moved from stock into the cart.
    CartAdd,
    /// Unit returned from the cart to stock.
    CartRemove,
}

impl AdjustmentReason {
    /// Stock delta this reason implies.
    pub fn delta(&self) -> i64 {
        match self {
            AdjustmentReason::Restock | AdjustmentReason::CartRemove => 1,
            AdjustmentReason::Correction | AdjustmentReason::CartAdd => -1,
        }
    }
}

/// A single stock change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Product that was adjusted.
    pub product: ProductName,
    /// Change in stock (positive or negative).
    pub delta: i64,
    /// Stock after the change.
    pub stock_after: u32,
    /// Reason for the adjustment.
    pub reason: AdjustmentReason,
}

impl StockAdjustment {
    pub fn new(product: ProductName, reason: AdjustmentReason, stock_after: u32) -> Self {
        Self {
            product,
            delta: reason.delta(),
            stock_after,
            reason,
        }
    }
}
