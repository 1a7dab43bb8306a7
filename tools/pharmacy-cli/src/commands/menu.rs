//! Interactive main menu: Product In Stock and Charging screens.

use anyhow::{bail, Result};
use dialoguer::Select;
use pharmacy_core::prelude::*;

use crate::context::{Context, DynStore};
use crate::views;

const MAIN_ITEMS: [&str; 3] = ["Product In Stock", "Charging", "Quit"];
const STOCK_ITEMS: [&str; 4] = ["+ Add stock", "- Subtract stock", "Details", "Back"];
const CHARGING_ITEMS: [&str; 4] = ["+ Add to charge", "- Remove from charge", "Add Bill", "Back"];

/// Run the interactive menu.
pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.output.is_interactive() {
        bail!("The menu needs an interactive terminal; use the stock, details or charge commands instead");
    }

    let mut session = ctx.open_session()?;
    let result = main_menu(&mut session, ctx);
    ctx.report_save(&session.close());
    result
}

fn main_menu(session: &mut Session<DynStore>, ctx: &Context) -> Result<()> {
    loop {
        ctx.report_save(&session.navigate());

        let choice = Select::new()
            .with_prompt("Pharmacy Management System")
            .items(&MAIN_ITEMS)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => stock_screen(session, ctx)?,
            Some(1) => charging_screen(session, ctx)?,
            _ => return Ok(()),
        }
    }
}

fn stock_screen(session: &mut Session<DynStore>, ctx: &Context) -> Result<()> {
    ctx.report_save(&session.navigate());

    loop {
        views::print_stock(&ctx.output, session.state());

        let choice = Select::new()
            .with_prompt("Product In Stock")
            .items(&STOCK_ITEMS)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => {
                if let Some(name) = pick_product(session.state(), "Add one unit of")? {
                    let result = session.state_mut().increase_stock(&name).map(|_| ());
                    notify(ctx, result);
                }
            }
            Some(1) => {
                if let Some(name) = pick_product(session.state(), "Subtract one unit of")? {
                    let result = session.state_mut().decrease_stock(&name).map(|_| ());
                    notify(ctx, result);
                }
            }
            Some(2) => {
                if let Some(name) = pick_product(session.state(), "Details for")? {
                    match session.state().product(&name) {
                        Ok(product) => views::print_details(&ctx.output, product),
                        Err(e) => report(ctx, &e),
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}

fn charging_screen(session: &mut Session<DynStore>, ctx: &Context) -> Result<()> {
    ctx.report_save(&session.enter_checkout());

    loop {
        views::print_charging(&ctx.output, session.state());

        let choice = Select::new()
            .with_prompt("Charging")
            .items(&CHARGING_ITEMS)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => {
                if let Some(name) = pick_product(session.state(), "Add to charge")? {
                    let result = session.state_mut().add_to_cart(&name).map(|_| ());
                    notify(ctx, result);
                }
            }
            Some(1) => {
                if let Some(name) = pick_product(session.state(), "Remove from charge")? {
                    match session.state_mut().remove_from_cart(&name) {
                        Ok(true) => {}
                        Ok(false) => ctx.output.info(&format!("No {} in charging.", name)),
                        Err(e) => report(ctx, &e),
                    }
                }
            }
            Some(2) => match session.generate_bill() {
                Ok((bill, status)) => {
                    ctx.report_save(&status);
                    notify(ctx, views::print_bill(&ctx.output, &bill));
                }
                Err(e) => report(ctx, &e),
            },
            _ => {
                ctx.report_save(&session.leave_checkout());
                return Ok(());
            }
        }
    }
}

/// Ask for a product. `None` means the operator backed out.
fn pick_product(state: &PharmacyState, prompt: &str) -> Result<Option<String>> {
    let items: Vec<String> = state
        .catalog()
        .iter()
        .map(|p| format!("{} - {} - Cost: {}", p.name, p.stock, p.price))
        .collect();

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.and_then(|i| state.catalog().iter().nth(i).map(|p| p.name.to_string())))
}

fn notify(ctx: &Context, result: Result<(), PharmacyError>) {
    if let Err(e) = result {
        report(ctx, &e);
    }
}

/// Operator mistakes get a blocking notice; faults are logged and shown
/// without stopping the menu.
fn report(ctx: &Context, error: &PharmacyError) {
    if error.is_recoverable() {
        ctx.output.notice(&error.to_string());
    } else {
        tracing::error!(error = %error, "operation failed");
        ctx.output.error(&format!("Error: {}", error));
    }
}
