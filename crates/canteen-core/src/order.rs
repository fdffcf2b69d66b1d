//! # Order
//!
//! The immutable snapshot sent to the order-recording endpoint, and the
//! identifier it hands back.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::address::Address;
use crate::cart::{Cart, LineItem};
use crate::money::Money;

/// Identifier assigned by the order-recording endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        OrderId(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId(id.to_string())
    }
}

/// An order as submitted: cart and address snapshots plus the total.
///
/// Built once, when checkout moves to `placing`, and never mutated. Later
/// cart edits do not reach it.
///
/// ## Wire Format
/// ```json
/// {
///   "cart": [{ "id": 1, "name": "Pizza", "price": 250, "quantity": 2 }],
///   "address": { "tower": "3", "floor": "5", "appartment": "002" },
///   "total": 500
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    cart: Vec<LineItem>,
    address: Address,
    #[ts(type = "number")]
    total: Money,
}

impl Order {
    /// Snapshots the cart and address.
    pub fn new(cart: &Cart, address: &Address, total: Money) -> Self {
        Order {
            cart: cart.items().to_vec(),
            address: address.clone(),
            total,
        }
    }

    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Σ line totals of the snapshot, independent of the stored total.
    pub fn computed_total(&self) -> Money {
        self.cart.iter().map(LineItem::line_total).sum()
    }
}
