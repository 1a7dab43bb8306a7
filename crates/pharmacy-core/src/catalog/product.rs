//! Product records.

use crate::ids::ProductName;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product on the pharmacy shelf.
///
/// `stock` is what remains in inventory; `quantity` is how many units the
/// current charging session has put in the cart. Both are unsigned, so
/// neither can go below zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product name.
    pub name: ProductName,
    /// Unit price.
    pub price: Money,
    /// Units in stock.
    pub stock: u32,
    /// Units in the current charging session.
    #[serde(default, skip_serializing)]
    pub quantity: u32,
    /// Short description for listings.
    pub description: String,
    /// Leaflet text for the details view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Product {
    /// Create a product with an empty cart quantity.
    pub fn new(
        name: impl Into<ProductName>,
        price: Money,
        stock: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            quantity: 0,
            description: description.into(),
            details: None,
        }
    }

    /// Attach leaflet text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Check if at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Multi-line summary shown on the details view.
    pub fn display_details(&self) -> String {
        format!(
            "Name: {}\nStock: {}\nPrice: {}\nDescription: {}",
            self.name, self.stock, self.price, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn paracetamol() -> Product {
        Product::new(
            "Paracetamol",
            Money::from_major(10, Currency::USD),
            10,
            "Relieves pain and reduces fever",
        )
    }

    #[test]
    fn test_new_product_has_no_cart_quantity() {
        let p = paracetamol();
        assert_eq!(p.quantity, 0);
        assert!(p.in_stock());
        assert!(p.details.is_none());
    }

    #[test]
    fn test_display_details() {
        let p = paracetamol();
        assert_eq!(
            p.display_details(),
            "Name: Paracetamol\nStock: 10\nPrice: $10.00\nDescription: Relieves pain and reduces fever"
        );
    }

    #[test]
    fn test_quantity_is_not_serialized() {
        let mut p = paracetamol();
        p.quantity = 3;
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("quantity").is_none());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back.quantity, 0);
    }
}
