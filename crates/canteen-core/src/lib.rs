//! # canteen-core: Pure Checkout Logic
//!
//! This crate is the **heart** of the canteen checkout. It contains the
//! cart math, address validation and the checkout state machine as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Canteen Checkout Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Checkout View (kiosk / web)                  │   │
//! │  │     Cart list ──► Address form ──► Confirm ──► Status screen    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            canteen-order (CheckoutService, HTTP client)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ canteen-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   money   │  │   cart    │  │  address  │  │ checkout  │   │   │
//! │  │   │   Money   │  │   Cart    │  │  Address  │  │ Controller│   │   │
//! │  │   │           │  │ LineItem  │  │ validity  │  │  Status   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILES                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic
//! - [`address`] - Delivery address and its selection lists
//! - [`cart`] - Line items, cart and quantity mutation
//! - [`order`] - Immutable order snapshot and order id
//! - [`checkout`] - The checkout state machine and its view
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use canteen_core::{Cart, LineItem, Money};
//!
//! let mut cart = Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)]);
//! cart.increment(1);
//! assert_eq!(cart.total().to_string(), "₹750.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use address::{Address, AddressField};
pub use cart::{Cart, CartState, LineItem, ProductId};
pub use checkout::{
    CheckoutController, CheckoutPolicy, CheckoutStatus, CheckoutView, GENERIC_FAILURE_MESSAGE,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of towers in the complex.
pub const TOWER_COUNT: u32 = 18;

/// Number of floors per tower.
pub const FLOOR_COUNT: u32 = 14;

/// Number of apartments per floor.
pub const APARTMENTS_PER_FLOOR: u32 = 6;
