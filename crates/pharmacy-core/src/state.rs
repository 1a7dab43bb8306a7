//! Application state: the catalog, the cart, and every operation that
//! mutates them.
//!
//! All mutation goes through `&mut PharmacyState`, so there is exactly one
//! writer at a time. Every operation either applies fully or returns an
//! error with the state untouched.

use std::fmt;

use tracing::{info, warn};

use crate::cart::Cart;
use crate::catalog::{AdjustmentReason, Catalog, Product, StockAdjustment};
use crate::checkout::Bill;
use crate::error::PharmacyError;
use crate::ids::ProductName;
use crate::money::Money;
use crate::store::Snapshot;

/// Callback invoked after every stock change.
pub type InventoryObserver = Box<dyn FnMut(&StockAdjustment)>;

/// Outcome of applying a snapshot to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Products whose stock was taken from the snapshot.
    pub applied: usize,
    /// Snapshot entries with no matching catalog product.
    pub unknown: Vec<ProductName>,
    /// Cart entries found in the snapshot and dropped.
    pub discarded_cart_entries: usize,
}

/// Catalog, cart and inventory observers.
pub struct PharmacyState {
    catalog: Catalog,
    cart: Cart,
    observers: Vec<InventoryObserver>,
}

impl fmt::Debug for PharmacyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PharmacyState")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PharmacyState {
    /// Create state with an empty cart.
    pub fn new(catalog: Catalog) -> Self {
        let cart = Cart::new(catalog.currency());
        Self {
            catalog,
            cart,
            observers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Running cart total.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Look up a product, failing with `UnknownProduct`.
    pub fn product(&self, name: &str) -> Result<&Product, PharmacyError> {
        self.catalog.require(name)
    }

    /// Register a callback for stock changes.
    ///
    /// Observers run in registration order after the change is applied.
    pub fn subscribe(&mut self, observer: impl FnMut(&StockAdjustment) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, adjustment: StockAdjustment) {
        for observer in self.observers.iter_mut() {
            observer(&adjustment);
        }
    }

    /// Add one unit to stock. Returns the new stock.
    pub fn increase_stock(&mut self, name: &str) -> Result<u32, PharmacyError> {
        let product = self.catalog.require_mut(name)?;
        product.stock = product.stock.checked_add(1).ok_or(PharmacyError::Overflow)?;
        let stock = product.stock;
        let name = product.name.clone();

        info!(product = %name, stock, "one unit added to stock");
        self.notify(StockAdjustment::new(name, AdjustmentReason::Restock, stock));
        Ok(stock)
    }

    /// Remove one unit from stock. Returns the new stock.
    pub fn decrease_stock(&mut self, name: &str) -> Result<u32, PharmacyError> {
        let product = self.catalog.require_mut(name)?;
        if product.stock == 0 {
            return Err(PharmacyError::OutOfStock(name.to_string()));
        }
        product.stock -= 1;
        let stock = product.stock;
        let name = product.name.clone();

        info!(product = %name, stock, "one unit subtracted from stock");
        self.notify(StockAdjustment::new(name, AdjustmentReason::Correction, stock));
        Ok(stock)
    }

    /// Move one unit from stock into the cart. Returns the new cart total.
    ///
    /// Adding to the cart is what takes the unit out of inventory; there is
    /// no separate hold step.
    pub fn add_to_cart(&mut self, name: &str) -> Result<Money, PharmacyError> {
        let product = self.catalog.require(name)?;
        if !product.in_stock() {
            info!(product = %name, "no more units in stock");
            return Err(PharmacyError::OutOfStock(name.to_string()));
        }
        let quantity = product.quantity.checked_add(1).ok_or(PharmacyError::Overflow)?;
        let product_name = product.name.clone();
        let price = product.price;

        self.cart.push(product_name.clone(), price)?;

        let product = self.catalog.require_mut(name)?;
        product.quantity = quantity;
        product.stock -= 1;
        let stock = product.stock;
        let total = self.cart.total();

        info!(product = %product_name, total = %total, "added to charging");
        self.notify(StockAdjustment::new(product_name, AdjustmentReason::CartAdd, stock));
        Ok(total)
    }

    /// Return one unit from the cart to stock.
    ///
    /// Returns `Ok(false)` and changes nothing when the product's cart
    /// quantity is already zero. Otherwise removes the first matching cart
    /// entry, not necessarily the most recent one.
    pub fn remove_from_cart(&mut self, name: &str) -> Result<bool, PharmacyError> {
        let product = self.catalog.require(name)?;
        if product.quantity == 0 {
            info!(product = %name, "not in charging");
            return Ok(false);
        }
        let stock = product.stock.checked_add(1).ok_or(PharmacyError::Overflow)?;
        let product_name = product.name.clone();

        // Quantity never exceeds the product's cart entries, but a missing
        // entry still returns the unit to stock.
        if self.cart.remove_first(name)?.is_none() {
            warn!(product = %product_name, "cart quantity set but no cart entry found");
        }

        let product = self.catalog.require_mut(name)?;
        product.quantity -= 1;
        product.stock = stock;
        let total = self.cart.total();

        info!(product = %product_name, total = %total, "removed from charging");
        self.notify(StockAdjustment::new(product_name, AdjustmentReason::CartRemove, stock));
        Ok(true)
    }

    /// Zero every product's cart quantity.
    ///
    /// Stock and cart entries are left alone.
    pub fn reset_cart(&mut self) {
        for product in self.catalog.iter_mut() {
            product.quantity = 0;
        }
    }

    /// Bill the cart contents and empty the cart.
    ///
    /// Fails with `EmptyCart` when the cart is empty and `allow_empty` is
    /// false. Stock was already taken by `add_to_cart`, so the bill does not
    /// touch it.
    pub fn generate_bill(&mut self, allow_empty: bool) -> Result<Bill, PharmacyError> {
        if self.cart.is_empty() && !allow_empty {
            return Err(PharmacyError::EmptyCart);
        }
        for entry in self.cart.entries() {
            self.catalog.require(entry.name.as_str())?;
        }

        let (entries, total) = self.cart.take();
        self.reset_cart();
        let bill = Bill::new(entries, total);

        info!(bill = %bill.id, items = bill.item_count(), total = %bill.total, "bill generated");
        Ok(bill)
    }

    /// Capture stock levels, cart and total for persistence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.catalog.stock_levels(),
            self.cart.names(),
            self.cart.total(),
        )
    }

    /// Apply a loaded snapshot.
    ///
    /// Only stock levels are taken. The cart, total and quantities always
    /// start empty so that an unfinished charge is not resurrected.
    pub fn restore(&mut self, snapshot: &Snapshot) -> RestoreReport {
        let unknown = self.catalog.apply_stock_levels(&snapshot.products);
        for name in &unknown {
            warn!(product = %name, "snapshot entry not in catalog, ignored");
        }

        self.cart.clear();
        self.reset_cart();

        RestoreReport {
            applied: snapshot.products.len() - unknown.len(),
            unknown,
            discarded_cart_entries: snapshot.order_list.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    fn state(products: &[(&str, i64, u32)]) -> PharmacyState {
        let products = products
            .iter()
            .map(|(name, price, stock)| Product::new(*name, usd(*price), *stock, ""))
            .collect();
        PharmacyState::new(Catalog::new(products).unwrap())
    }

    #[test]
    fn test_increase_and_decrease_stock() {
        let mut s = state(&[("A", 5, 1)]);
        assert_eq!(s.increase_stock("A").unwrap(), 2);
        assert_eq!(s.decrease_stock("A").unwrap(), 1);
        assert_eq!(s.decrease_stock("A").unwrap(), 0);
        assert_eq!(
            s.decrease_stock("A").unwrap_err(),
            PharmacyError::OutOfStock("A".to_string())
        );
        assert_eq!(s.product("A").unwrap().stock, 0);
    }

    #[test]
    fn test_unknown_product() {
        let mut s = state(&[("A", 5, 1)]);
        let unknown = PharmacyError::UnknownProduct("Z".to_string());
        assert_eq!(s.increase_stock("Z").unwrap_err(), unknown);
        assert_eq!(s.decrease_stock("Z").unwrap_err(), unknown);
        assert_eq!(s.add_to_cart("Z").unwrap_err(), unknown);
        assert_eq!(s.remove_from_cart("Z").unwrap_err(), unknown);
    }

    #[test]
    fn test_increase_stock_overflow() {
        let mut s = state(&[("A", 5, u32::MAX)]);
        assert_eq!(s.increase_stock("A").unwrap_err(), PharmacyError::Overflow);
        assert_eq!(s.product("A").unwrap().stock, u32::MAX);
    }

    #[test]
    fn test_remove_with_zero_quantity_is_noop() {
        let mut s = state(&[("A", 5, 3)]);
        assert!(!s.remove_from_cart("A").unwrap());
        assert_eq!(s.product("A").unwrap().stock, 3);
        assert!(s.cart().is_empty());
    }

    #[test]
    fn test_reset_cart_keeps_entries_and_stock() {
        let mut s = state(&[("A", 5, 3)]);
        s.add_to_cart("A").unwrap();
        s.reset_cart();

        let a = s.product("A").unwrap();
        assert_eq!(a.quantity, 0);
        assert_eq!(a.stock, 2);
        assert_eq!(s.cart().len(), 1);
        assert_eq!(s.total(), usd(5));

        // Quantity is gone, so removal no longer applies to the old entry.
        assert!(!s.remove_from_cart("A").unwrap());
    }

    #[test]
    fn test_generate_bill_empty_cart() {
        let mut s = state(&[("A", 5, 3)]);
        assert_eq!(s.generate_bill(false).unwrap_err(), PharmacyError::EmptyCart);

        let bill = s.generate_bill(true).unwrap();
        assert!(bill.is_empty());
        assert!(bill.total.is_zero());
    }

    #[test]
    fn test_generate_bill_resets_quantities() {
        let mut s = state(&[("A", 5, 3)]);
        s.add_to_cart("A").unwrap();
        s.add_to_cart("A").unwrap();

        let bill = s.generate_bill(false).unwrap();

        assert_eq!(bill.item_count(), 2);
        assert_eq!(bill.total, usd(10));
        assert_eq!(s.product("A").unwrap().quantity, 0);
        assert_eq!(s.product("A").unwrap().stock, 1);
        assert!(s.cart().is_empty());
        assert!(s.total().is_zero());
    }

    #[test]
    fn test_observers_see_every_stock_change() {
        let seen: Rc<RefCell<Vec<(AdjustmentReason, u32)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut s = state(&[("A", 5, 1)]);
        s.subscribe(move |adj| sink.borrow_mut().push((adj.reason, adj.stock_after)));

        s.increase_stock("A").unwrap();
        s.add_to_cart("A").unwrap();
        s.remove_from_cart("A").unwrap();
        s.decrease_stock("A").unwrap();
        let _ = s.decrease_stock("Z");

        assert_eq!(
            *seen.borrow(),
            vec![
                (AdjustmentReason::Restock, 2),
                (AdjustmentReason::CartAdd, 1),
                (AdjustmentReason::CartRemove, 2),
                (AdjustmentReason::Correction, 1),
            ]
        );
    }

    #[test]
    fn test_snapshot_captures_cart() {
        let mut s = state(&[("A", 5, 3), ("B", 15, 1)]);
        s.add_to_cart("B").unwrap();
        let snapshot = s.snapshot();

        assert_eq!(snapshot.products.get("A"), Some(&3));
        assert_eq!(snapshot.products.get("B"), Some(&0));
        assert_eq!(snapshot.order_list, vec![ProductName::new("B")]);
        assert_eq!(snapshot.total_cost, usd(15));
    }

    #[test]
    fn test_restore_discards_cart() {
        let mut s = state(&[("A", 5, 3), ("B", 15, 1)]);
        let mut snapshot = s.snapshot();
        snapshot.products.insert(ProductName::new("A"), 9);
        snapshot.products.remove("B");
        snapshot.products.insert(ProductName::new("Ghost"), 4);
        snapshot.order_list = vec![ProductName::new("A"), ProductName::new("A")];
        snapshot.total_cost = usd(10);

        s.add_to_cart("A").unwrap();
        let report = s.restore(&snapshot);

        assert_eq!(report.applied, 1);
        assert_eq!(report.unknown, vec![ProductName::new("Ghost")]);
        assert_eq!(report.discarded_cart_entries, 2);
        assert_eq!(s.product("A").unwrap().stock, 9);
        assert_eq!(s.product("B").unwrap().stock, 1);
        assert_eq!(s.product("A").unwrap().quantity, 0);
        assert!(s.cart().is_empty());
        assert!(s.total().is_zero());
    }
}
