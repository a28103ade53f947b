//! Cart CLI - manage a persistent shopping cart from the terminal.
//!
//! Commands:
//! - `cart add` - Add a product to the cart
//! - `cart remove` - Remove a product from the cart
//! - `cart set` / `cart inc` / `cart dec` - Change a line's quantity
//! - `cart clear` - Empty the cart
//! - `cart show` / `cart summary` - Inspect the cart and its totals
//! - `cart checkout` - Proceed to checkout
//! - `cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod logger;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, RemoveArgs, SetArgs, StepArgs};

/// Cart CLI - manage a persistent shopping cart
#[derive(Parser)]
#[command(name = "cart")]
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

    /// Use a separate cart for this shopper
    #[arg(long, global = true)]
    shopper: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product
    Set(SetArgs),

    /// Increase a product's quantity by one
    Inc(StepArgs),

    /// Decrease a product's quantity by one
    Dec(StepArgs),

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// List the cart contents
    Show,

    /// Show the order summary
    Summary,

    /// Proceed to checkout
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.shopper, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Set(args) => commands::cart::set(args, &ctx),
        Commands::Inc(args) => commands::cart::increment(args, &ctx),
        Commands::Dec(args) => commands::cart::decrement(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Show => commands::show::show(&ctx),
        Commands::Summary => commands::show::summary(&ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
