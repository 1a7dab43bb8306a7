//! Stock listing and adjustment.

use anyhow::{bail, Result};
use pharmacy_core::prelude::*;

use super::{resolve_name, StockArgs, StockCommand};
use crate::context::{Context, DynStore};
use crate::views;

/// Run the stock command.
pub fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    let result = match args.command.unwrap_or(StockCommand::List) {
        StockCommand::List => {
            views::print_stock(&ctx.output, session.state());
            Ok(())
        }
        StockCommand::Add { name, count } => add(&mut session, &name, count, ctx),
        StockCommand::Remove { name, count } => remove(&mut session, &name, count, ctx),
    };

    ctx.report_save(&session.close());
    result
}

fn add(session: &mut Session<DynStore>, name: &str, count: u32, ctx: &Context) -> Result<()> {
    let name = resolve_name(session.state(), name);
    let mut stock = session.state().product(&name)?.stock;
    for _ in 0..count {
        stock = session.state_mut().increase_stock(&name)?;
    }

    ctx.output.success(&format!(
        "{} unit(s) of {} added to stock. Current stock: {}",
        count, name, stock
    ));
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "name": name, "stock": stock }));
    }
    Ok(())
}

fn remove(session: &mut Session<DynStore>, name: &str, count: u32, ctx: &Context) -> Result<()> {
    let name = resolve_name(session.state(), name);
    let removal = remove_units(session.state_mut(), &name, count)?;

    if let Some(ref e) = removal.stopped_by {
        ctx.output.warn(&e.to_string());
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "name": name,
            "stock": removal.stock,
            "removed": removal.removed,
        }));
    }
    if removal.stopped_by.is_some() && removal.removed == 0 {
        bail!("No units of {} removed", name);
    }
    ctx.output.success(&format!(
        "{} unit(s) of {} subtracted from stock. Current stock: {}",
        removal.removed, name, removal.stock
    ));
    Ok(())
}

/// Outcome of taking several units out of stock.
#[derive(Debug, PartialEq)]
struct Removal {
    removed: u32,
    stock: u32,
    /// Set when stock ran out before `count` units were taken.
    stopped_by: Option<PharmacyError>,
}

fn remove_units(state: &mut PharmacyState, name: &str, count: u32) -> Result<Removal, PharmacyError> {
    let mut removal = Removal {
        removed: 0,
        stock: state.product(name)?.stock,
        stopped_by: None,
    };

    for _ in 0..count {
        match state.decrease_stock(name) {
            Ok(left) => {
                removal.stock = left;
                removal.removed += 1;
            }
            Err(e @ PharmacyError::OutOfStock(_)) => {
                removal.stopped_by = Some(e);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(removal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PharmacyState {
        PharmacyState::new(builtin_catalog(Currency::USD).unwrap())
    }

    #[test]
    fn test_remove_zero_units_is_not_a_failure() {
        let mut s = state();
        let removal = remove_units(&mut s, "Semicon", 0).unwrap();
        assert_eq!(removal.removed, 0);
        assert_eq!(removal.stock, 15);
        assert!(removal.stopped_by.is_none());
    }

    #[test]
    fn test_remove_stops_when_stock_runs_out() {
        let mut s = state();
        let removal = remove_units(&mut s, "Chlorpheniramine", 8).unwrap();
        assert_eq!(removal.removed, 5);
        assert_eq!(removal.stock, 0);
        assert_eq!(
            removal.stopped_by,
            Some(PharmacyError::OutOfStock("Chlorpheniramine".to_string()))
        );
    }

    #[test]
    fn test_remove_unknown_product() {
        let mut s = state();
        assert_eq!(
            remove_units(&mut s, "Aspirin", 1).unwrap_err(),
            PharmacyError::UnknownProduct("Aspirin".to_string())
        );
    }
}
