//! Bill types.

use crate::cart::CartEntry;
use crate::error::PharmacyError;
use crate::ids::{BillId, ProductName};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One billed unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillItem {
    /// Product name at time of sale.
    pub name: ProductName,
    /// Unit price at time of sale.
    pub unit_price: Money,
}

impl From<CartEntry> for BillItem {
    fn from(entry: CartEntry) -> Self {
        Self {
            name: entry.name,
            unit_price: entry.unit_price,
        }
    }
}

/// Billed units of one product, grouped for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillLine {
    pub name: ProductName,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A generated bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    /// Bill number.
    pub id: BillId,
    /// When the bill was generated.
    pub issued_at: DateTime<Utc>,
    /// Billed units, in the order they were added to the cart.
    pub items: Vec<BillItem>,
    /// Amount charged.
    pub total: Money,
}

impl Bill {
    /// Create a bill from cart entries and the cart's running total.
    pub fn new(entries: Vec<CartEntry>, total: Money) -> Self {
        Self {
            id: BillId::generate(),
            issued_at: Utc::now(),
            items: entries.into_iter().map(BillItem::from).collect(),
            total,
        }
    }

    /// Number of billed units.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items grouped by product, in order of first appearance.
    ///
    /// Fails with `Overflow` if a line total does not fit.
    pub fn lines(&self) -> Result<Vec<BillLine>, PharmacyError> {
        let mut lines: Vec<BillLine> = Vec::new();
        for item in &self.items {
            match lines.iter_mut().find(|l| l.name == item.name) {
                Some(line) => {
                    line.quantity = line.quantity.checked_add(1).ok_or(PharmacyError::Overflow)?;
                    line.line_total = line
                        .line_total
                        .try_add(&item.unit_price)
                        .ok_or(PharmacyError::Overflow)?;
                }
                None => lines.push(BillLine {
                    name: item.name.clone(),
                    quantity: 1,
                    unit_price: item.unit_price,
                    line_total: item.unit_price,
                }),
            }
        }
        Ok(lines)
    }
}
