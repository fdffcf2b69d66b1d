//! # Canteen Kiosk Entry Point
//!
//! Runs one checkout from the terminal: load a cart, take the delivery
//! address, confirm, and print the resulting screen.
//!
//! ## Usage
//! ```text
//! canteen-kiosk --cart cart.json --tower 3 --floor 5 --apartment 002
//! canteen-kiosk --cart cart.json --endpoint https://orders.example.com/api/orders
//! ```
//!
//! ## Exit Status
//! - `0` order placed
//! - `1` submission failed, or the kiosk could not start
//! - `2` address incomplete (nothing was sent)
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Load checkout config (file, env, `--endpoint`)
//! 4. Read and validate the cart file
//! 5. Run the checkout and print the screen

mod error;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use canteen_core::validation::{validate_address_choice, validate_cart};
use canteen_core::{AddressField, Cart, CartState, CheckoutView};
use canteen_order::{CheckoutConfig, CheckoutService, HttpOrderClient};

use error::{KioskError, KioskResult};

/// Command-line arguments for the kiosk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cart file: JSON array of `{ id, name, price, quantity }`
    #[arg(long)]
    cart: PathBuf,

    /// Tower number (1-18)
    #[arg(long, value_parser = tower_choice)]
    tower: Option<String>,

    /// Floor number (1-14)
    #[arg(long, value_parser = floor_choice)]
    floor: Option<String>,

    /// Apartment number (001-006)
    #[arg(long, value_parser = apartment_choice)]
    apartment: Option<String>,

    /// Path to checkout.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Order endpoint URL, overriding config and environment
    #[arg(long)]
    endpoint: Option<String>,
}

fn choice(field: AddressField, value: &str) -> Result<String, String> {
    validate_address_choice(field, value)
        .map(|()| value.to_string())
        .map_err(|e| e.to_string())
}

fn tower_choice(value: &str) -> Result<String, String> {
    choice(AddressField::Tower, value)
}

fn floor_choice(value: &str) -> Result<String, String> {
    choice(AddressField::Floor, value)
}

fn apartment_choice(value: &str) -> Result<String, String> {
    choice(AddressField::Apartment, value)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(args).await {
        Ok(view) => ExitCode::from(exit_status(&view)),
        Err(err) => {
            error!(error = %err, "Kiosk stopped");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, DEBUG for canteen crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,canteen=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> KioskResult<CheckoutView> {
    let mut config = CheckoutConfig::load(args.config)?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint.url = endpoint;
        config.validate()?;
    }
    info!(endpoint = %config.endpoint.url, "Checkout configured");

    let cart = load_cart(&args.cart)?;
    let client = HttpOrderClient::from_config(&config)?;
    let checkout = CheckoutService::new(client, CartState::new(cart), config.policy());

    let choices = [
        (AddressField::Tower, args.tower),
        (AddressField::Floor, args.floor),
        (AddressField::Apartment, args.apartment),
    ];
    for (field, value) in choices {
        if let Some(value) = value {
            checkout.set_address_field(field, value).await?;
        }
    }

    match checkout.confirm_order().await {
        Ok(status) => info!(%status, "Checkout finished"),
        Err(err) if err.is_validation() => warn!(error = %err, "Order not sent"),
        Err(err) => return Err(err.into()),
    }

    let snapshot = checkout.snapshot().await;
    println!("{}", render::screen(&snapshot, &checkout.cart()));
    Ok(snapshot.view())
}

/// Reads a cart file and checks every line item.
fn load_cart(path: &Path) -> KioskResult<Cart> {
    let contents = std::fs::read_to_string(path).map_err(|source| KioskError::CartFile {
        path: path.to_path_buf(),
        source,
    })?;
    let cart: Cart = serde_json::from_str(&contents)?;
    validate_cart(&cart)?;

    info!(
        items = cart.item_count(),
        total = %cart.total(),
        "Cart loaded"
    );
    Ok(cart)
}

fn exit_status(view: &CheckoutView) -> u8 {
    match view {
        CheckoutView::Success { .. } => 0,
        CheckoutView::Cart { .. } => 2,
        CheckoutView::Placing | CheckoutView::Error { .. } => 1,
    }
}
