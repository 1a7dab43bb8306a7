//! Product details view.

use anyhow::Result;

use super::{resolve_name, DetailsArgs};
use crate::context::Context;
use crate::views;

/// Run the details command.
pub fn run(args: DetailsArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let name = resolve_name(session.state(), &args.name);
    let product = session.state().product(&name)?;

    views::print_details(&ctx.output, product);
    Ok(())
}
