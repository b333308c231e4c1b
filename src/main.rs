//! Checkout
//!
//! Prices a list of items against a fixture set and prints the receipt.
//!
//! Items are product names, optionally followed by `=QUANTITY`:
//!
//! ```text
//! checkout beans beans beans coke=2 oranges=0.2 "arbor ale" kaleidoscope=2 butcombe
//! ```
//!
//! Use `-f` to load a fixture set by name, `--table` for a boxed receipt and `-v` for debug logs.
//! `RUST_LOG` overrides the log filter.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use supermarket_pricing::{cart::Cart, fixtures::Fixture, receipt::Receipt};

/// Arguments for the checkout
#[derive(Debug, Parser)]
#[clap(version, about = "Price a cart of items and print the receipt")]
struct CheckoutArgs {
    /// Fixture set to load the catalogue & offers from
    #[clap(short, long, default_value = "supermarket")]
    fixture: String,

    /// Directory containing the `products/` and `offers/` fixture files
    #[clap(long, default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Print the receipt as a table
    #[clap(long)]
    table: bool,

    /// Log debug output to stderr
    #[clap(short, long)]
    verbose: bool,

    /// Items to add, as `NAME` or `NAME=QUANTITY`
    #[clap(required = true)]
    items: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    init_logging(args.verbose);

    let mut fixture = Fixture::with_base_path(&args.fixtures);

    fixture
        .load_products(&args.fixture)
        .with_context(|| format!("Failed to load products for fixture set {}", args.fixture))?;

    fixture
        .load_offers(&args.fixture)
        .with_context(|| format!("Failed to load offers for fixture set {}", args.fixture))?;

    let (catalogue, offers) = fixture.into_parts()?;

    debug!(
        products = catalogue.len(),
        offers = offers.len(),
        "Loaded fixture set {}",
        args.fixture
    );

    let mut cart = Cart::new(&catalogue, &offers);

    for item in &args.items {
        match item.split_once('=') {
            Some((name, quantity)) => cart.add_product(name, quantity)?,
            None => cart.add_one(item)?,
        };
    }

    let receipt = Receipt::from_cart(&cart);
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.table {
        receipt.write_table_to(&mut handle)?;
    } else {
        receipt.write_to(&mut handle)?;
    }

    Ok(())
}
