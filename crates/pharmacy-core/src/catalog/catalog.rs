//! The fixed product catalog.

use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::error::PharmacyError;
use crate::ids::ProductName;
use crate::money::Currency;

/// Products offered by the pharmacy, in display order.
///
/// The set of products is fixed once the catalog is built; only the
/// per-product counters change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog.
    ///
    /// Returns an error if:
    /// - The list is empty
    /// - Two products share a name
    /// - Prices use more than one currency
    pub fn new(products: Vec<Product>) -> Result<Self, PharmacyError> {
        let first = products.first().ok_or_else(|| {
            PharmacyError::Validation("catalog must contain at least one product".to_string())
        })?;
        let currency = first.price.currency;

        for (i, product) in products.iter().enumerate() {
            if products[..i].iter().any(|p| p.name == product.name) {
                return Err(PharmacyError::Validation(format!(
                    "duplicate product name: {}",
                    product.name
                )));
            }
            if product.price.currency != currency {
                return Err(PharmacyError::Validation(format!(
                    "{} is priced in {}, expected {}",
                    product.name, product.price.currency, currency
                )));
            }
        }

        Ok(Self { products })
    }

    /// Currency every price in the catalog uses.
    pub fn currency(&self) -> Currency {
        self.products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name.as_str() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.name.as_str() == name)
    }

    /// Look up a product, failing with `UnknownProduct`.
    pub fn require(&self, name: &str) -> Result<&Product, PharmacyError> {
        self.get(name)
            .ok_or_else(|| PharmacyError::UnknownProduct(name.to_string()))
    }

    pub(crate) fn require_mut(&mut self, name: &str) -> Result<&mut Product, PharmacyError> {
        self.get_mut(name)
            .ok_or_else(|| PharmacyError::UnknownProduct(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.products.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Current stock of every product, keyed by name.
    pub fn stock_levels(&self) -> BTreeMap<ProductName, u32> {
        self.products
            .iter()
            .map(|p| (p.name.clone(), p.stock))
            .collect()
    }

    /// Overwrite stock counts by name.
    ///
    /// Products missing from `levels` keep their current stock. Returns the
    /// names in `levels` that are not in the catalog.
    pub fn apply_stock_levels(&mut self, levels: &BTreeMap<ProductName, u32>) -> Vec<ProductName> {
        let mut unknown = Vec::new();
        for (name, stock) in levels {
            match self.get_mut(name.as_str()) {
                Some(product) => product.stock = *stock,
                None => unknown.push(name.clone()),
            }
        }
        unknown
    }
}
