//! # canteen-order: Order Submission
//!
//! The I/O half of the checkout: configuration, the HTTP client for the
//! order-recording endpoint, and the [`CheckoutService`] that runs one
//! checkout from cart to confirmation.
//!
//! ## Module Organization
//! ```text
//! canteen_order/
//! ├── lib.rs      ◄─── You are here (exports)
//! ├── config.rs   ◄─── CheckoutConfig (TOML + env overrides)
//! ├── client.rs   ◄─── OrderGateway trait, HttpOrderClient (reqwest)
//! ├── service.rs  ◄─── CheckoutService (cart + state machine + gateway)
//! └── error.rs    ◄─── SubmitError
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use canteen_core::{Address, Cart, CartState, LineItem, Money};
//! use canteen_order::{CheckoutConfig, CheckoutService, HttpOrderClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CheckoutConfig::load_or_default(None);
//! let client = HttpOrderClient::from_config(&config)?;
//! let cart = Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)]);
//!
//! let checkout = CheckoutService::new(client, CartState::new(cart), config.policy());
//! checkout.set_address(Address::new("3", "5", "002")).await?;
//! let status = checkout.confirm_order().await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod service;

#[cfg(test)]
mod test_support;

pub use client::{HttpOrderClient, OrderGateway};
pub use config::{CheckoutConfig, CheckoutSettings, EndpointSettings};
pub use error::{SubmitError, SubmitResult};
pub use service::CheckoutService;
