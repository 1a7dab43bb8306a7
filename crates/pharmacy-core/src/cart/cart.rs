//! Cart (order list) and its entries.

use crate::error::PharmacyError;
use crate::ids::ProductName;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One unit queued for billing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartEntry {
    /// Product name.
    pub name: ProductName,
    /// Unit price at the time the unit was added.
    pub unit_price: Money,
}

/// Units queued for billing, with a running total.
///
/// A product added three times appears three times. The total is kept up
/// to date on every push and removal rather than recomputed, and always
/// equals the sum of the entry prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
    total: Money,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            entries: Vec::new(),
            total: Money::zero(currency),
        }
    }

    /// Append one unit.
    ///
    /// Returns an error (and leaves the cart unchanged) if the price currency
    /// differs from the cart's or the total would overflow.
    pub fn push(&mut self, name: ProductName, unit_price: Money) -> Result<(), PharmacyError> {
        let total = self.add_to_total(&unit_price)?;
        self.entries.push(CartEntry { name, unit_price });
        self.total = total;
        Ok(())
    }

    /// Remove the first entry for `name`.
    ///
    /// Later duplicates stay in place. Returns the removed entry, or `None`
    /// if the product is not in the cart.
    pub fn remove_first(&mut self, name: &str) -> Result<Option<CartEntry>, PharmacyError> {
        let Some(index) = self.entries.iter().position(|e| e.name.as_str() == name) else {
            return Ok(None);
        };
        let total = self
            .total
            .try_subtract(&self.entries[index].unit_price)
            .ok_or(PharmacyError::Overflow)?;
        self.total = total;
        Ok(Some(self.entries.remove(index)))
    }

    /// Empty the cart and reset the total to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total = Money::zero(self.total.currency);
    }

    /// Move the entries and total out, leaving the cart empty.
    pub fn take(&mut self) -> (Vec<CartEntry>, Money) {
        let entries = std::mem::take(&mut self.entries);
        let zero = Money::zero(self.total.currency);
        let total = std::mem::replace(&mut self.total, zero);
        (entries, total)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Running total.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn currency(&self) -> Currency {
        self.total.currency
    }

    /// Number of units in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of units of one product.
    pub fn count_of(&self, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.name.as_str() == name)
            .count()
    }

    /// Product names in cart order.
    pub fn names(&self) -> Vec<ProductName> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Sum of entry prices, recomputed from scratch.
    pub fn computed_total(&self) -> Option<Money> {
        Money::try_sum(self.entries.iter().map(|e| &e.unit_price), self.currency())
    }

    fn add_to_total(&self, price: &Money) -> Result<Money, PharmacyError> {
        if price.currency != self.total.currency {
            return Err(PharmacyError::Validation(format!(
                "price in {} added to a {} cart",
                price.currency, self.total.currency
            )));
        }
        self.total.try_add(price).ok_or(PharmacyError::Overflow)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(major: i64) -> Money {
        Money::from_major(major, Currency::USD)
    }

    #[test]
    fn test_push_updates_total() {
        let mut cart = Cart::new(Currency::USD);
        cart.push("A".into(), usd(5)).unwrap();
        cart.push("A".into(), usd(5)).unwrap();
        cart.push("B".into(), usd(15)).unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.count_of("A"), 2);
        assert_eq!(cart.total(), usd(25));
        assert_eq!(cart.computed_total(), Some(usd(25)));
    }

    #[test]
    fn test_remove_first_only_removes_one() {
        let mut cart = Cart::new(Currency::USD);
        cart.push("A".into(), usd(5)).unwrap();
        cart.push("B".into(), usd(15)).unwrap();
        cart.push("A".into(), usd(5)).unwrap();

        let removed = cart.remove_first("A").unwrap().unwrap();
        assert_eq!(removed.name.as_str(), "A");
        assert_eq!(cart.names(), vec![ProductName::new("B"), ProductName::new("A")]);
        assert_eq!(cart.total(), usd(20));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut cart = Cart::new(Currency::USD);
        cart.push("A".into(), usd(5)).unwrap();
        assert!(cart.remove_first("B").unwrap().is_none());
        assert_eq!(cart.total(), usd(5));
    }

    #[test]
    fn test_push_rejects_other_currency() {
        let mut cart = Cart::new(Currency::USD);
        let result = cart.push("A".into(), Money::from_major(5, Currency::EUR));
        assert!(result.is_err());
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_push_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::new(Currency::USD);
        cart.push("A".into(), Money::new(i64::MAX, Currency::USD)).unwrap();
        let result = cart.push("A".into(), Money::new(1, Currency::USD));
        assert_eq!(result, Err(PharmacyError::Overflow));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_take_empties_cart() {
        let mut cart = Cart::new(Currency::USD);
        cart.push("A".into(), usd(5)).unwrap();
        let (entries, total) = cart.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(total, usd(5));
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }
}
