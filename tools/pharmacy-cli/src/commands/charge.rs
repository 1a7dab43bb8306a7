//! One-shot sale: put the named units in the cart and bill them.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use pharmacy_core::prelude::*;

use super::{resolve_name, ChargeArgs};
use crate::context::{Context, DynStore};
use crate::views;

/// Run the charge command.
pub fn run(args: ChargeArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    let names: Vec<String> = args
        .items
        .iter()
        .map(|item| resolve_name(session.state(), item))
        .collect();
    for name in &names {
        session.state().product(name)?;
    }

    let status = session.enter_checkout();
    ctx.report_save(&status);

    let result = charge(&mut session, &names, args.yes, ctx);

    ctx.report_save(&session.leave_checkout());
    ctx.report_save(&session.close());
    result
}

fn charge(session: &mut Session<DynStore>, names: &[String], yes: bool, ctx: &Context) -> Result<()> {
    let mut added = Vec::new();
    for name in names {
        match session.state_mut().add_to_cart(name) {
            Ok(_) => added.push(name.as_str()),
            Err(e @ PharmacyError::OutOfStock(_)) => ctx.output.warn(&e.to_string()),
            Err(e) => {
                release(session.state_mut(), &added);
                return Err(e.into());
            }
        }
    }

    if added.is_empty() {
        bail!("Nothing to charge");
    }

    if !yes && ctx.output.is_interactive() {
        views::print_charging(&ctx.output, session.state());
        let confirmed = Confirm::new()
            .with_prompt(format!("Bill {} for {}?", added.len(), session.state().total()))
            .default(true)
            .interact()?;

        if !confirmed {
            release(session.state_mut(), &added);
            ctx.output.info("Charge cancelled, units returned to stock");
            return Ok(());
        }
    }

    let (bill, status) = session.generate_bill()?;
    ctx.report_save(&status);
    views::print_bill(&ctx.output, &bill)?;
    ctx.output
        .success(&format!("Charged {} item(s), total {}", bill.item_count(), bill.total));
    Ok(())
}

/// Return units added by this command to stock.
fn release(state: &mut PharmacyState, added: &[&str]) {
    for name in added {
        if let Err(e) = state.remove_from_cart(name) {
            tracing::warn!(product = %name, error = %e, "could not return unit to stock");
        }
    }
}
