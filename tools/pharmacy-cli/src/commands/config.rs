//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let catalog = ctx.config.build_catalog()?;
    let source = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "config_path": ctx.config_path,
            "snapshot_path": ctx.snapshot_path(),
            "config": ctx.config,
            "catalog_size": catalog.len(),
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("source", &source);
    ctx.output.kv("currency", catalog.currency().code());

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("path", &ctx.snapshot_path().display().to_string());
    ctx.output.kv("enabled", &ctx.config.store.enabled.to_string());

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv("autosave", ctx.config.session.autosave.as_str());
    ctx.output.kv(
        "allow_empty_checkout",
        &ctx.config.session.allow_empty_checkout.to_string(),
    );

    ctx.output.info("");
    let origin = if ctx.config.catalog.is_empty() {
        "built-in"
    } else {
        "config"
    };
    ctx.output
        .kv("catalog", &format!("{} products ({})", catalog.len(), origin));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
