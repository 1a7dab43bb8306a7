//! Pharmacy CLI - point of sale and stock keeping for a small pharmacy.
//!
//! Commands:
//! - `pharmacy` / `pharmacy menu` - Interactive menu
//! - `pharmacy stock` - List or adjust stock
//! - `pharmacy details` - Show product details
//! - `pharmacy charge` - Sell products and print a bill
//! - `pharmacy config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod views;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChargeArgs, ConfigArgs, DetailsArgs, StockArgs};

/// Pharmacy CLI - Manage stock and charge customers
#[derive(Parser)]
#[command(name = "pharmacy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// List or adjust stock
    Stock(StockArgs),

    /// Show details for a product
    Details(DetailsArgs),

    /// Charge products and print the bill
    Charge(ChargeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&ctx),
        Commands::Stock(args) => commands::stock::run(args, &ctx),
        Commands::Details(args) => commands::details::run(args, &ctx),
        Commands::Charge(args) => commands::charge::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
