//! MATech CLI - catalog browsing and cart management.
//!
//! # Usage
//!
//! ```bash
//! # Show the merged catalog (defaults + remote imports)
//! matech catalog
//!
//! # Add product 2 to the cart
//! matech cart add 2
//!
//! # Change a quantity (fractions are truncated)
//! matech cart set 2 5
//!
//! # Finish the purchase
//! matech cart checkout
//! ```
//!
//! The cart persists under the configured data directory between runs. This
//! binary is the reference presentation layer for the storefront core: it
//! subscribes to cart change events and calls the mutation entry points,
//! nothing more.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "matech")]
#[command(author, version, about = "MATech store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged product catalog
    Catalog,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id from the catalog
        id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id of the cart line
        id: String,
    },
    /// Set the quantity of a cart line
    Set {
        /// Product id of the cart line
        id: String,
        /// New quantity (positive integer)
        quantity: String,
    },
    /// Empty the cart
    Clear,
    /// Finalize the purchase and clear the cart
    Checkout,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "matech=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog => commands::catalog::show().await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { id } => commands::cart::add(&id).await?,
            CartAction::Remove { id } => commands::cart::remove(&id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&id, &quantity)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout()?,
        },
    }
    Ok(())
}
