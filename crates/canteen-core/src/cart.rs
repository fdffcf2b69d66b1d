//! # Cart
//!
//! The ordered list of line items the user is about to order.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  View Action              Operation                 Cart Change         │
//! │  ───────────              ─────────                 ───────────         │
//! │                                                                         │
//! │  Add from menu ─────────► add_item() ─────────────► push or qty += n   │
//! │                                                                         │
//! │  Click "+" ─────────────► increment() ────────────► qty += 1           │
//! │                                                                         │
//! │  Click "−" ─────────────► decrement() ────────────► qty -= 1 (min 0)   │
//! │                                                                         │
//! │  Any quantity ──────────► update_quantity() ──────► qty = max(n, 0)    │
//! │                                                                         │
//! │  NOTE: Items are never removed by a quantity change. An item at zero   │
//! │        stays in place so a later "+" restores it in the same slot.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;

/// Menu product identifier.
pub type ProductId = u64;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its own quantity.
///
/// Wire names follow the order endpoint: `id`, `name`, `price`, `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[ts(type = "number")]
    pub id: ProductId,

    pub name: String,

    /// Price of one unit.
    #[serde(rename = "price")]
    #[ts(type = "number")]
    pub unit_price: Money,

    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        LineItem {
            id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, or `None` if it does not fit.
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items keep the order in which they were added
/// - Quantities are never negative (`u32`, and negative requests clamp to 0)
/// - Items at quantity 0 are retained
///
/// ```rust
/// use canteen_core::{Cart, LineItem, Money};
///
/// let mut cart = Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)]);
/// cart.update_quantity(1, -5);
/// assert_eq!(cart.get(1).map(|i| i.quantity), Some(0));
/// assert_eq!(cart.item_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart holding the given items in order.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart { items }
    }

    /// Adds a line item, or adds its quantity to the existing item with the
    /// same id.
    pub fn add_item(&mut self, item: LineItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(product_id = item.id, quantity = existing.quantity, "Cart item quantity increased");
            return;
        }

        debug!(product_id = item.id, quantity = item.quantity, "Cart item added");
        self.items.push(item);
    }

    /// Replaces the quantity of an item.
    ///
    /// ## Behavior
    /// - Negative quantities clamp to 0; the item stays in the cart
    /// - Unknown product ids are a no-op
    /// - Other items and their order are untouched
    ///
    /// ## Returns
    /// `true` if an item with `product_id` exists.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == product_id) else {
            debug!(product_id, "Quantity update for product not in cart ignored");
            return false;
        };

        let clamped = quantity.clamp(0, i64::from(u32::MAX)) as u32;
        item.quantity = clamped;
        debug!(product_id, requested = quantity, quantity = clamped, "Cart item quantity set");
        true
    }

    /// Adds one unit of an item.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(item) => {
                let next = i64::from(item.quantity) + 1;
                self.update_quantity(product_id, next)
            }
            None => false,
        }
    }

    /// Removes one unit of an item, stopping at zero.
    pub fn decrement(&mut self, product_id: ProductId) -> bool {
        match self.get(product_id) {
            Some(item) => {
                let next = i64::from(item.quantity) - 1;
                self.update_quantity(product_id, next)
            }
            None => false,
        }
    }

    /// Looks up an item by product id.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// The line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of line items, including zero-quantity ones.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ unit price × quantity.
    ///
    /// Saturates on overflow; carts that reach that are refused by
    /// [`validate_cart`](crate::validation::validate_cart).
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Σ unit price × quantity, or `None` if it does not fit.
    pub fn checked_total(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |sum, item| sum.checked_add(item.checked_line_total()?))
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the cart and returns its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

// =============================================================================
// Shared Cart State
// =============================================================================

/// Thread-safe cart handle.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Cart>>`: the cart outlives any one checkout and is
/// reached from several tasks. Cart operations are short, so the lock is
/// never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Wraps a cart.
    pub fn new(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        // A poisoned lock still holds a consistent cart: every mutation is a
        // single field assignment or push.
        let cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut cart)
    }

    /// Returns a copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
