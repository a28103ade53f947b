//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: String,

    /// Product name (required for products not yet in the cart).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Unit price in major units, e.g. 499.99.
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Quantity to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Product image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Product description.
    #[arg(long)]
    pub description: Option<String>,

    /// Product category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product ID.
    pub id: String,

    /// New quantity. Zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the inc and dec commands.
#[derive(Args)]
pub struct StepArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Seconds to show the checkout notice (overrides config).
    #[arg(long)]
    pub notice_secs: Option<u64>,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
