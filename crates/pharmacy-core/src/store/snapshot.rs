//! Persisted snapshot of pharmacy state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ProductName;
use crate::money::Money;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Stock levels, order list and running total as written to storage.
///
/// Every field is optional on read so that older or hand-edited files
/// still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Stock per product name.
    #[serde(default)]
    pub products: BTreeMap<ProductName, u32>,
    /// Cart contents in order.
    #[serde(default)]
    pub order_list: Vec<ProductName>,
    /// Cart running total.
    #[serde(default)]
    pub total_cost: Money,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Snapshot {
    pub fn new(
        products: BTreeMap<ProductName, u32>,
        order_list: Vec<ProductName>,
        total_cost: Money,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Some(Utc::now()),
            products,
            order_list,
            total_cost,
        }
    }
}
