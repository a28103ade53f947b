//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output.kv("key", &ctx.config.storage.key);

    ctx.output.info("[pricing]");
    let pricing = &ctx.config.pricing;
    ctx.output.kv("currency", &pricing.currency);
    ctx.output.kv(
        "free_shipping_threshold",
        &pricing.free_shipping_threshold.to_string(),
    );
    ctx.output
        .kv("flat_shipping_fee", &pricing.flat_shipping_fee.to_string());
    ctx.output.kv("tax_rate", &pricing.tax_rate.to_string());

    ctx.output.info("[checkout]");
    ctx.output
        .kv("notice_secs", &ctx.config.checkout.notice_secs.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("cart.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.storage.key.trim().is_empty() {
        errors.push("storage.key must not be empty".to_string());
    }

    if let Err(e) = ctx.config.to_policy() {
        errors.push(format!("pricing: {:#}", e));
    }

    if ctx.config.pricing.flat_shipping_fee > ctx.config.pricing.free_shipping_threshold {
        warnings.push(
            "pricing.flat_shipping_fee is larger than the free shipping threshold".to_string(),
        );
    }

    if ctx.config.checkout.notice_secs == 0 {
        warnings.push(
            "checkout.notice_secs is 0; the checkout notice will not show".to_string(),
        );
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
