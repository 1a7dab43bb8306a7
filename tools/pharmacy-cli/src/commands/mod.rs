//! CLI command implementations.

pub mod charge;
pub mod config;
pub mod details;
pub mod menu;
pub mod stock;

use clap::{Args, Subcommand};
use pharmacy_core::prelude::*;

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: Option<StockCommand>,
}

#[derive(Subcommand)]
pub enum StockCommand {
    /// List products with stock and price.
    List,
    /// Add units to stock.
    Add {
        /// Product name (case-insensitive).
        name: String,

        /// Number of units.
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },
    /// Take units out of stock.
    Remove {
        /// Product name (case-insensitive).
        name: String,

        /// Number of units.
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },
}

/// Arguments for the details command.
#[derive(Args)]
pub struct DetailsArgs {
    /// Product name (case-insensitive).
    pub name: String,
}

/// Arguments for the charge command.
#[derive(Args)]
pub struct ChargeArgs {
    /// Products to sell, one unit per argument.
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default pharmacy.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Map operator input to a catalog name.
///
/// Matches exactly first, then case-insensitively. Unmatched input is
/// returned unchanged so the state reports `UnknownProduct` for it.
pub fn resolve_name(state: &PharmacyState, input: &str) -> String {
    let input = input.trim();
    if state.catalog().contains(input) {
        return input.to_string();
    }
    state
        .catalog()
        .iter()
        .find(|p| p.name.as_str().eq_ignore_ascii_case(input))
        .map(|p| p.name.to_string())
        .unwrap_or_else(|| input.to_string())
}
