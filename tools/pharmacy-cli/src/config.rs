//! CLI configuration.

use std::path::Path;

use anyhow::{bail, Context, Result};
use pharmacy_core::prelude::*;
use pharmacy_core::store::DEFAULT_SNAPSHOT_FILE;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["pharmacy.toml", ".pharmacy.toml", "pharmacy.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacyConfig {
    /// Currency code for catalog prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Snapshot storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Autosave and checkout behaviour.
    #[serde(default)]
    pub session: SessionOptions,

    /// Catalog override. Empty means the built-in catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalog: Vec<ProductConfig>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for PharmacyConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            store: StoreConfig::default(),
            session: SessionOptions::default(),
            catalog: Vec::new(),
        }
    }
}

impl PharmacyConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Parsed currency.
    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.currency) {
            Some(currency) => Ok(currency),
            None => bail!("Unsupported currency: {}", self.currency),
        }
    }

    /// Build the catalog from config, or the built-in one if none is given.
    pub fn build_catalog(&self) -> Result<Catalog> {
        let currency = self.currency()?;
        if self.catalog.is_empty() {
            return Ok(builtin_catalog(currency)?);
        }

        let products = self
            .catalog
            .iter()
            .map(|p| p.to_product(currency))
            .collect::<Result<Vec<_>>>()?;
        Catalog::new(products).context("Invalid catalog in config")
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file path, relative to the working directory.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// When false, state lives in memory only.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_store_path() -> String {
    DEFAULT_SNAPSHOT_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            enabled: true,
        }
    }
}

/// A catalog entry in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,

    /// Price in whole currency units.
    pub price: i64,

    pub stock: u32,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProductConfig {
    fn to_product(&self, currency: Currency) -> Result<Product> {
        if self.name.trim().is_empty() {
            bail!("Catalog entry with an empty name");
        }
        if self.price < 0 {
            bail!("{} has a negative price", self.name);
        }
        let mut product = Product::new(
            self.name.as_str(),
            Money::from_major(self.price, currency),
            self.stock,
            self.description.as_str(),
        );
        product.details = self.details.clone();
        Ok(product)
    }
}

/// Generate a default pharmacy.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Pharmacy point of sale configuration

currency = "USD"

[store]
path = "{snapshot}"
enabled = true

[session]
# "every-transition" saves on every screen change,
# "checkout-and-exit" only after a bill and on exit.
autosave = "every-transition"
allow_empty_checkout = true

# Uncomment to replace the built-in catalog.
# [[catalog]]
# name = "Paracetamol"
# price = 10
# stock = 10
# description = "Relieves pain and reduces fever"
"#,
        snapshot = DEFAULT_SNAPSHOT_FILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: PharmacyConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.store.path, DEFAULT_SNAPSHOT_FILE);
        assert!(config.store.enabled);
        assert_eq!(config.session.autosave, AutosavePolicy::EveryTransition);
        assert!(config.catalog.is_empty());
    }

    #[test]
    fn test_empty_config_uses_builtin_catalog() {
        let config: PharmacyConfig = toml::from_str("").unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_catalog_override() {
        let config: PharmacyConfig = toml::from_str(
            r#"
currency = "thb"

[session]
autosave = "checkout-and-exit"

[[catalog]]
name = "Paracetamol"
price = 10
stock = 3

[[catalog]]
name = "Betadine"
price = 12
stock = 1
description = "External disinfectant"
"#,
        )
        .unwrap();

        assert_eq!(config.session.autosave, AutosavePolicy::CheckoutAndExit);
        assert!(config.session.allow_empty_checkout);

        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), Currency::THB);
        assert_eq!(catalog.get("Paracetamol").unwrap().stock, 3);
    }

    #[test]
    fn test_duplicate_catalog_entries_rejected() {
        let config: PharmacyConfig = toml::from_str(
            r#"
[[catalog]]
name = "A"
price = 1
stock = 1

[[catalog]]
name = "A"
price = 2
stock = 2
"#,
        )
        .unwrap();
        assert!(config.build_catalog().is_err());
    }

    #[test]
    fn test_unknown_currency() {
        let config: PharmacyConfig = toml::from_str(r#"currency = "XYZ""#).unwrap();
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pharmacy.json");
        std::fs::write(&path, r#"{"store": {"enabled": false}}"#).unwrap();

        let config = PharmacyConfig::load(&path).unwrap();
        assert!(!config.store.enabled);
        assert_eq!(config.store.path, DEFAULT_SNAPSHOT_FILE);
    }
}
