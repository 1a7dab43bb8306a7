//! Screens shared by the interactive menu and the one-shot commands.

use console::style;
use pharmacy_core::prelude::*;
use serde::Serialize;

use crate::output::{stock_badge, Output};

/// One row of the stock listing.
#[derive(Debug, Serialize)]
pub struct StockRow {
    pub name: String,
    pub stock: u32,
    pub price: Money,
    pub description: String,
}

impl StockRow {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.to_string(),
            stock: product.stock,
            price: product.price,
            description: product.description.clone(),
        }
    }
}

pub fn stock_rows(state: &PharmacyState) -> Vec<StockRow> {
    state.catalog().iter().map(StockRow::from_product).collect()
}

fn name_width(state: &PharmacyState) -> usize {
    state
        .catalog()
        .iter()
        .map(|p| p.name.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4)
}

/// Product In Stock screen.
pub fn print_stock(output: &Output, state: &PharmacyState) {
    if output.is_json() {
        output.json(&stock_rows(state));
        return;
    }

    output.header("Product In Stock");
    let widths = [name_width(state), 6, 10];
    output.table_header(&["Name", "Stock", "Cost"], &widths);
    for product in state.catalog().iter() {
        output.table_row(
            &[
                product.name.as_str(),
                &stock_badge(product.stock),
                &product.price.display(),
            ],
            &widths,
        );
    }
}

/// Charging screen: per-product cart quantity and the running total.
pub fn print_charging(output: &Output, state: &PharmacyState) {
    if output.is_json() {
        output.json(state.cart());
        return;
    }

    output.header("Charging");
    let widths = [name_width(state), 8, 10];
    output.table_header(&["Name", "Quantity", "Cost"], &widths);
    for product in state.catalog().iter() {
        output.table_row(
            &[
                product.name.as_str(),
                &product.quantity.to_string(),
                &product.price.display(),
            ],
            &widths,
        );
    }
    if !state.cart().is_empty() {
        output.kv("In cart", &state.cart().len().to_string());
    }
    output.kv("Total cost", &style(state.total()).bold().to_string());
}

/// Details view for one product.
pub fn print_details(output: &Output, product: &Product) {
    if output.is_json() {
        output.json(product);
        return;
    }

    output.header(&format!("Details - {}", product.name));
    output.text(&product.display_details());
    if let Some(ref details) = product.details {
        println!();
        output.text(details);
    }
}

/// A generated bill.
pub fn print_bill(output: &Output, bill: &Bill) -> Result<(), PharmacyError> {
    if output.is_json() {
        output.json(bill);
        return Ok(());
    }

    output.header(&format!("Bill {}", bill.id));
    output.kv("Issued", &bill.issued_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    let lines = bill.lines()?;
    let width = lines
        .iter()
        .map(|l| l.name.as_str().len())
        .max()
        .unwrap_or(4)
        .max(4);
    let widths = [width, 4, 10, 10];
    output.table_header(&["Item", "Qty", "Price", "Amount"], &widths);
    for line in &lines {
        output.table_row(
            &[
                line.name.as_str(),
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.line_total.display(),
            ],
            &widths,
        );
    }
    output.kv("Total cost", &style(bill.total).bold().to_string());
    Ok(())
}
