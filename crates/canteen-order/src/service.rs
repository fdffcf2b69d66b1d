//! # Checkout Service
//!
//! Ties one cart, one checkout state machine and one order gateway together.
//!
//! ## Confirm Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         confirm_order()                                 │
//! │                                                                         │
//! │  lock checkout ──► controller.confirm(cart, total) ──► unlock           │
//! │        │                     │                                          │
//! │        │              Err ◄──┘ (address incomplete, total mismatch,     │
//! │        │                        already placing / finished)             │
//! │        ▼                                                                │
//! │  gateway.submit(order)            (status = placing, lock released)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  lock checkout ──► controller.settle(outcome) ──► success | error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! While the order is in flight the status is `placing`, so a second
//! confirm, a cart edit or an address edit is refused with an error
//! instead of queueing behind the first.

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use canteen_core::{
    Address, AddressField, Cart, CartState, CheckoutController, CheckoutPolicy, CheckoutStatus,
    CheckoutView, CoreResult, Money, OrderId, ProductId,
};

use crate::client::OrderGateway;

/// One checkout session.
///
/// ## Locking
/// The checkout lock is held while the cart is read for confirm and while
/// the cart is edited, never while the order is in flight.
pub struct CheckoutService<G> {
    id: Uuid,
    cart: CartState,
    checkout: Mutex<CheckoutController>,
    gateway: G,
}

impl<G: OrderGateway> CheckoutService<G> {
    /// Creates an idle checkout over `cart`.
    pub fn new(gateway: G, cart: CartState, policy: CheckoutPolicy) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, verify_total = policy.verify_total, "Checkout session created");

        CheckoutService {
            id,
            cart,
            checkout: Mutex::new(CheckoutController::with_policy(policy)),
            gateway,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// A copy of the cart as it is now.
    pub fn cart(&self) -> Cart {
        self.cart.snapshot()
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub async fn status(&self) -> CheckoutStatus {
        self.checkout.lock().await.status().clone()
    }

    pub async fn view(&self) -> CheckoutView {
        self.checkout.lock().await.view()
    }

    pub async fn address(&self) -> Address {
        self.checkout.lock().await.address().clone()
    }

    pub async fn can_close(&self) -> bool {
        self.checkout.lock().await.can_close()
    }

    pub async fn order_id(&self) -> Option<OrderId> {
        self.checkout.lock().await.order_id().cloned()
    }

    pub async fn error_message(&self) -> Option<String> {
        self.checkout
            .lock()
            .await
            .error_message()
            .map(str::to_string)
    }

    /// A copy of the whole checkout state.
    pub async fn snapshot(&self) -> CheckoutController {
        self.checkout.lock().await.clone()
    }

    // =========================================================================
    // Cart Editing
    // =========================================================================

    /// Sets a line's quantity; negative values clamp to zero.
    ///
    /// Returns `false` when no line has `product_id`.
    pub async fn update_quantity(&self, product_id: ProductId, quantity: i64) -> CoreResult<bool> {
        self.edit_cart(|cart| cart.update_quantity(product_id, quantity))
            .await
    }

    pub async fn increment(&self, product_id: ProductId) -> CoreResult<bool> {
        self.edit_cart(|cart| cart.increment(product_id)).await
    }

    pub async fn decrement(&self, product_id: ProductId) -> CoreResult<bool> {
        self.edit_cart(|cart| cart.decrement(product_id)).await
    }

    async fn edit_cart<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let checkout = self.checkout.lock().await;
        checkout.ensure_editable()?;
        Ok(self.cart.with_cart_mut(f))
    }

    // =========================================================================
    // Address Entry
    // =========================================================================

    pub async fn set_address(&self, address: Address) -> CoreResult<()> {
        self.checkout.lock().await.set_address(address)
    }

    pub async fn set_address_field(
        &self,
        field: AddressField,
        value: impl Into<String>,
    ) -> CoreResult<()> {
        self.checkout.lock().await.set_address_field(field, value)
    }

    // =========================================================================
    // Confirm
    // =========================================================================

    /// Confirms with the cart's own total.
    ///
    /// ## Returns
    /// - `Ok(status)` once the submission has settled, `success` or `error`
    /// - `Err(_)` if the confirm was refused and nothing was sent
    pub async fn confirm_order(&self) -> CoreResult<CheckoutStatus> {
        self.place_order(None).await
    }

    /// Confirms with a total computed by the caller.
    pub async fn confirm_order_with_total(&self, total: Money) -> CoreResult<CheckoutStatus> {
        self.place_order(Some(total)).await
    }

    /// The cart snapshot, its total and the idle→placing transition all
    /// happen under one hold of the checkout lock.
    #[instrument(skip(self), fields(checkout = %self.id))]
    async fn place_order(&self, total: Option<Money>) -> CoreResult<CheckoutStatus> {
        let order = {
            let mut checkout = self.checkout.lock().await;
            let cart = self.cart.snapshot();
            let total = total.unwrap_or_else(|| cart.total());
            checkout.confirm(&cart, total)?
        };

        let outcome = self.gateway.submit(&order).await;

        let mut checkout = self.checkout.lock().await;
        checkout.settle(outcome)?;
        info!(status = %checkout.status(), "Checkout settled");
        Ok(checkout.status().clone())
    }

    // =========================================================================
    // After Submission
    // =========================================================================

    /// From `success` or `error`: clear the address and go back to the cart.
    ///
    /// The cart itself is left as it is.
    pub async fn place_another_order(&self) -> CoreResult<()> {
        self.checkout.lock().await.place_another_order()
    }

    pub async fn start_new_order(&self) -> CoreResult<()> {
        self.checkout.lock().await.start_new_order()
    }

    pub async fn retry(&self) -> CoreResult<()> {
        self.checkout.lock().await.retry()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
