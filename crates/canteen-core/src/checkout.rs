//! # Checkout State Machine
//!
//! Tracks one checkout from address entry to the endpoint's answer.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Status Transitions                          │
//! │                                                                         │
//! │            confirm (address invalid)                                    │
//! │            attempted_submit = true                                      │
//! │              ┌──────┐                                                   │
//! │              ▼      │                                                   │
//! │          ┌────────┐ │  confirm (valid)   ┌─────────┐                    │
//! │   ──────►│  Idle  │─┴──────────────────►│ Placing │                    │
//! │          └────────┘                      └────┬────┘                    │
//! │            ▲    ▲                   resolve   │   reject                │
//! │            │    │              ┌──────────────┴──────────┐              │
//! │            │    │              ▼                         ▼              │
//! │            │    │        ┌──────────┐              ┌─────────┐          │
//! │            │    └────────│ Success  │              │  Error  │          │
//! │            │  new order  └──────────┘              └────┬────┘          │
//! │            └────────────────────────────────────────────┘               │
//! │                                retry                                    │
//! │                                                                         │
//! │  Editable: Idle only          Closable: Idle, Error                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is not owned here. The controller reads it at confirm time and
//! keeps the resulting [`Order`] snapshot; resets never touch it.
//!
//! ## Example
//! ```rust
//! use canteen_core::{Address, Cart, CheckoutController, LineItem, Money, OrderId};
//!
//! let cart = Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)]);
//! let mut checkout = CheckoutController::new();
//!
//! // Confirming without an address only raises the warning.
//! assert!(checkout.confirm(&cart, cart.total()).is_err());
//! assert!(checkout.show_address_warning());
//!
//! checkout.set_address(Address::new("3", "5", "002")).unwrap();
//! let order = checkout.confirm(&cart, cart.total()).unwrap();
//! assert_eq!(order.total(), Money::from_rupees(500));
//!
//! checkout.resolve(OrderId::new("ORD123")).unwrap();
//! assert_eq!(checkout.order_id().map(OrderId::as_str), Some("ORD123"));
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::address::{Address, AddressField};
use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::{Order, OrderId};
use crate::validation::{validate_address, validate_cart, validate_total};

/// Shown when a submission fails without any message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit order.";

// =============================================================================
// Status
// =============================================================================

/// Where the checkout is, with the data that status carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// Collecting the address; the cart may be edited.
    Idle,

    /// The order has been handed to the endpoint and is awaiting its answer.
    Placing { order: Order },

    /// The endpoint recorded the order.
    Success {
        order: Order,
        order_id: OrderId,
        confirmed_at: DateTime<Utc>,
    },

    /// The endpoint rejected the order or could not be reached.
    Error { message: String },
}

impl CheckoutStatus {
    /// Lowercase status name, as used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutStatus::Idle => "idle",
            CheckoutStatus::Placing { .. } => "placing",
            CheckoutStatus::Success { .. } => "success",
            CheckoutStatus::Error { .. } => "error",
        }
    }

    /// True for `success` and `error`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutStatus::Success { .. } | CheckoutStatus::Error { .. }
        )
    }
}

impl fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Checks applied when the user confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Recompute the cart total and reject a caller-supplied total that
    /// differs from it.
    pub verify_total: bool,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        CheckoutPolicy { verify_total: true }
    }
}

// =============================================================================
// View
// =============================================================================

/// What the checkout screen should show for the current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum CheckoutView {
    /// Cart list, address form and confirm button.
    #[serde(rename_all = "camelCase")]
    Cart {
        show_address_warning: bool,
        confirm_enabled: bool,
    },

    /// Spinner while the order is being placed.
    Placing,

    /// Confirmation with the order id and a "place another order" button.
    #[serde(rename_all = "camelCase")]
    Success { order_id: OrderId },

    /// Failure message with a "try again" button.
    Error { message: String },
}

impl CheckoutView {
    /// Heading of the checkout panel.
    pub fn title(&self) -> &'static str {
        match self {
            CheckoutView::Cart { .. } => "Cart",
            _ => "Order Status",
        }
    }

    /// Whether the close button dismisses the panel.
    pub fn closable(&self) -> bool {
        matches!(self, CheckoutView::Cart { .. } | CheckoutView::Error { .. })
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The checkout state machine.
///
/// Owns the delivery address and the `attempted_submit` flag for one
/// checkout, plus the current [`CheckoutStatus`]. Every method that is not
/// accepted in the current status returns an error and changes nothing.
#[derive(Debug, Clone)]
pub struct CheckoutController {
    status: CheckoutStatus,
    address: Address,
    attempted_submit: bool,
    policy: CheckoutPolicy,
}

impl Default for CheckoutController {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutController {
    /// Creates an idle checkout with an empty address.
    pub fn new() -> Self {
        Self::with_policy(CheckoutPolicy::default())
    }

    /// Creates an idle checkout with explicit confirm-time checks.
    pub fn with_policy(policy: CheckoutPolicy) -> Self {
        CheckoutController {
            status: CheckoutStatus::Idle,
            address: Address::default(),
            attempted_submit: false,
            policy,
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn status(&self) -> &CheckoutStatus {
        &self.status
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn attempted_submit(&self) -> bool {
        self.attempted_submit
    }

    pub fn policy(&self) -> CheckoutPolicy {
        self.policy
    }

    /// The order being placed or already placed.
    pub fn order(&self) -> Option<&Order> {
        match &self.status {
            CheckoutStatus::Placing { order } | CheckoutStatus::Success { order, .. } => {
                Some(order)
            }
            _ => None,
        }
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        match &self.status {
            CheckoutStatus::Success { order_id, .. } => Some(order_id),
            _ => None,
        }
    }

    /// When the endpoint recorded the order.
    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        match &self.status {
            CheckoutStatus::Success { confirmed_at, .. } => Some(*confirmed_at),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            CheckoutStatus::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_address_valid(&self) -> bool {
        self.address.is_valid()
    }

    /// The inline address warning shows only after the user tried to
    /// confirm, and only while the address is still incomplete.
    pub fn show_address_warning(&self) -> bool {
        self.attempted_submit && !self.is_address_valid()
    }

    /// The confirm button is disabled while the warning is showing.
    pub fn confirm_enabled(&self) -> bool {
        matches!(self.status, CheckoutStatus::Idle) && !self.show_address_warning()
    }

    pub fn can_edit(&self) -> bool {
        matches!(self.status, CheckoutStatus::Idle)
    }

    /// Closing is refused mid-flight and on the success screen.
    pub fn can_close(&self) -> bool {
        matches!(
            self.status,
            CheckoutStatus::Idle | CheckoutStatus::Error { .. }
        )
    }

    /// Returns `EditingLocked` unless the checkout is idle.
    pub fn ensure_editable(&self) -> CoreResult<()> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(CoreError::EditingLocked {
                status: self.status.name(),
            })
        }
    }

    /// Describes the screen for the current status.
    pub fn view(&self) -> CheckoutView {
        match &self.status {
            CheckoutStatus::Idle => CheckoutView::Cart {
                show_address_warning: self.show_address_warning(),
                confirm_enabled: self.confirm_enabled(),
            },
            CheckoutStatus::Placing { .. } => CheckoutView::Placing,
            CheckoutStatus::Success { order_id, .. } => CheckoutView::Success {
                order_id: order_id.clone(),
            },
            CheckoutStatus::Error { message } => CheckoutView::Error {
                message: message.clone(),
            },
        }
    }

    // =========================================================================
    // Address Entry
    // =========================================================================

    /// Replaces the whole address.
    pub fn set_address(&mut self, address: Address) -> CoreResult<()> {
        self.ensure_editable()?;
        self.address = address;
        Ok(())
    }

    /// Replaces one address field.
    pub fn set_address_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) -> CoreResult<()> {
        self.ensure_editable()?;
        self.address.set(field, value);
        Ok(())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// The user confirms the order.
    ///
    /// ## Behavior
    /// - Marks the submit as attempted, whatever the outcome
    /// - Incomplete address: `Validation(MissingAddressFields)`, stays idle
    /// - Negative price or an amount past the paise range:
    ///   `Validation(MustBeNonNegative | AmountOutOfRange)`
    /// - Total differs from the cart (when verified): `Validation(TotalMismatch)`
    /// - Otherwise snapshots the order, moves to `placing` and returns the
    ///   order for submission
    pub fn confirm(&mut self, cart: &Cart, total: Money) -> CoreResult<Order> {
        self.expect_status("confirm the order", |s| matches!(s, CheckoutStatus::Idle))?;

        self.attempted_submit = true;

        if let Err(err) = validate_address(&self.address) {
            warn!(missing = ?self.address.missing_fields(), "Confirm refused: address incomplete");
            return Err(err.into());
        }

        if let Err(err) = validate_cart(cart) {
            warn!(error = %err, "Confirm refused: cart invalid");
            return Err(err.into());
        }

        if self.policy.verify_total {
            if let Err(err) = validate_total(cart, total) {
                warn!(%total, computed = %cart.total(), "Confirm refused: total mismatch");
                return Err(err.into());
            }
        }

        let order = Order::new(cart, &self.address, total);
        info!(
            items = order.cart().len(),
            total = %order.total(),
            "Checkout placing order"
        );
        self.status = CheckoutStatus::Placing {
            order: order.clone(),
        };
        Ok(order)
    }

    /// The endpoint recorded the order.
    pub fn resolve(&mut self, order_id: OrderId) -> CoreResult<()> {
        let order = match &self.status {
            CheckoutStatus::Placing { order } => order.clone(),
            other => return Err(invalid("record the order id", other)),
        };

        info!(%order_id, "Order placed");
        self.status = CheckoutStatus::Success {
            order,
            order_id,
            confirmed_at: Utc::now(),
        };
        Ok(())
    }

    /// The submission failed.
    ///
    /// An empty message is replaced by [`GENERIC_FAILURE_MESSAGE`].
    pub fn reject(&mut self, message: impl Into<String>) -> CoreResult<()> {
        self.expect_status("record a failure", |s| {
            matches!(s, CheckoutStatus::Placing { .. })
        })?;

        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };

        warn!(%message, "Order failed");
        self.status = CheckoutStatus::Error { message };
        Ok(())
    }

    /// Applies the outcome of a submission.
    pub fn settle<E: fmt::Display>(&mut self, outcome: Result<OrderId, E>) -> CoreResult<()> {
        match outcome {
            Ok(order_id) => self.resolve(order_id),
            Err(err) => self.reject(err.to_string()),
        }
    }

    /// From `success`: start a fresh order.
    pub fn start_new_order(&mut self) -> CoreResult<()> {
        self.expect_status("start a new order", |s| {
            matches!(s, CheckoutStatus::Success { .. })
        })?;
        self.reset();
        Ok(())
    }

    /// From `error`: go back to the cart and try again.
    pub fn retry(&mut self) -> CoreResult<()> {
        self.expect_status("retry", |s| matches!(s, CheckoutStatus::Error { .. }))?;
        self.reset();
        Ok(())
    }

    /// From either terminal status: back to an empty checkout.
    pub fn place_another_order(&mut self) -> CoreResult<()> {
        self.expect_status("place another order", CheckoutStatus::is_terminal)?;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        debug!(from = self.status.name(), "Checkout reset to idle");
        self.status = CheckoutStatus::Idle;
        self.address = Address::default();
        self.attempted_submit = false;
    }

    fn expect_status(
        &self,
        action: &'static str,
        accepted: impl Fn(&CheckoutStatus) -> bool,
    ) -> CoreResult<()> {
        if accepted(&self.status) {
            Ok(())
        } else {
            Err(invalid(action, &self.status))
        }
    }
}

fn invalid(action: &'static str, status: &CheckoutStatus) -> CoreError {
    warn!(action, status = status.name(), "Checkout action refused");
    CoreError::InvalidTransition {
        action,
        status: status.name(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::error::ValidationError;

    fn pizza_cart() -> Cart {
        Cart::from_items(vec![LineItem::new(1, "Pizza", Money::from_rupees(250), 2)])
    }

    fn valid_address() -> Address {
        Address::new("3", "5", "002")
    }

    fn placing() -> (CheckoutController, Cart) {
        let cart = pizza_cart();
        let mut checkout = CheckoutController::new();
        checkout.set_address(valid_address()).unwrap();
        checkout.confirm(&cart, cart.total()).unwrap();
        (checkout, cart)
    }

    #[test]
    fn test_starts_idle_without_warning() {
        let checkout = CheckoutController::new();

        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
        assert_eq!(checkout.address(), &Address::default());
        assert!(!checkout.attempted_submit());
        assert!(!checkout.show_address_warning());
        assert!(checkout.confirm_enabled());
        assert!(checkout.can_close());
    }

    #[test]
    fn test_confirm_with_empty_address_stays_idle_and_warns() {
        let cart = pizza_cart();
        let mut checkout = CheckoutController::new();

        let err = checkout.confirm(&cart, cart.total()).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingAddressFields { .. })
        ));
        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
        assert!(checkout.attempted_submit());
        assert!(checkout.show_address_warning());
        assert_eq!(
            checkout.view(),
            CheckoutView::Cart {
                show_address_warning: true,
                confirm_enabled: false,
            }
        );
    }

    #[test]
    fn test_warning_clears_once_address_complete() {
        let cart = pizza_cart();
        let mut checkout = CheckoutController::new();
        let _ = checkout.confirm(&cart, cart.total());

        checkout.set_address_field(AddressField::Tower, "3").unwrap();
        checkout.set_address_field(AddressField::Floor, "5").unwrap();
        assert!(checkout.show_address_warning());

        checkout.set_address_field(AddressField::Apartment, "002").unwrap();
        assert!(!checkout.show_address_warning());
        assert!(checkout.confirm_enabled());
    }

    #[test]
    fn test_confirm_refuses_cart_total_out_of_range() {
        let cart = Cart::from_items(vec![LineItem::new(
            1,
            "Feast",
            Money::from_paise(i64::MAX / 2 + 1),
            2,
        )]);
        let mut checkout = CheckoutController::new();
        checkout.set_address(valid_address()).unwrap();

        let err = checkout.confirm(&cart, cart.total()).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::AmountOutOfRange { .. })
        ));
        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
    }

    #[test]
    fn test_confirmed_at_set_only_on_success() {
        let (mut checkout, _) = placing();
        assert_eq!(checkout.confirmed_at(), None);

        let before = Utc::now();
        checkout.resolve(OrderId::new("ORD123")).unwrap();

        let confirmed_at = checkout.confirmed_at().unwrap();
        assert!(confirmed_at >= before && confirmed_at <= Utc::now());
    }

    #[test]
    fn test_confirm_with_valid_address_moves_to_placing() {
        let (checkout, cart) = placing();

        assert_eq!(checkout.status().name(), "placing");
        assert_eq!(checkout.view(), CheckoutView::Placing);
        let order = checkout.order().unwrap();
        assert_eq!(order.cart(), cart.items());
        assert_eq!(order.address(), &valid_address());
        assert_eq!(order.total(), Money::from_rupees(500));
    }

    #[test]
    fn test_resolve_moves_to_success() {
        let (mut checkout, _) = placing();

        checkout.resolve(OrderId::new("ORD123")).unwrap();

        assert_eq!(checkout.status().name(), "success");
        assert_eq!(checkout.order_id().map(OrderId::as_str), Some("ORD123"));
        assert!(checkout.order().is_some());
        assert_eq!(
            checkout.view(),
            CheckoutView::Success {
                order_id: OrderId::new("ORD123")
            }
        );
    }

    #[test]
    fn test_reject_moves_to_error_with_message() {
        let (mut checkout, _) = placing();

        checkout.reject("Sheet quota exceeded").unwrap();

        assert_eq!(checkout.error_message(), Some("Sheet quota exceeded"));
        assert!(checkout.order_id().is_none());
    }

    #[test]
    fn test_reject_without_message_uses_generic_text() {
        let (mut checkout, _) = placing();

        checkout.reject("").unwrap();

        assert_eq!(checkout.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_settle_maps_both_outcomes() {
        let (mut ok, _) = placing();
        ok.settle::<String>(Ok(OrderId::new("A1"))).unwrap();
        assert_eq!(ok.order_id().map(OrderId::as_str), Some("A1"));

        let (mut failed, _) = placing();
        failed
            .settle::<&str>(Err("connection refused"))
            .unwrap();
        assert_eq!(failed.error_message(), Some("connection refused"));
    }

    #[test]
    fn test_placing_only_leaves_through_settlement() {
        let (mut checkout, cart) = placing();

        assert!(!checkout.can_close());
        assert!(!checkout.can_edit());
        assert!(!checkout.confirm_enabled());
        assert!(matches!(
            checkout.confirm(&cart, cart.total()),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            checkout.set_address(Address::default()),
            Err(CoreError::EditingLocked { status: "placing" })
        ));
        assert!(checkout.start_new_order().is_err());
        assert!(checkout.retry().is_err());
        assert!(checkout.place_another_order().is_err());

        assert_eq!(checkout.status().name(), "placing");
        assert_eq!(checkout.address(), &valid_address());
    }

    #[test]
    fn test_settlement_refused_outside_placing() {
        let mut checkout = CheckoutController::new();
        assert!(checkout.resolve(OrderId::new("X")).is_err());
        assert!(checkout.reject("boom").is_err());
        assert_eq!(checkout.status(), &CheckoutStatus::Idle);

        let (mut done, _) = placing();
        done.resolve(OrderId::new("ORD1")).unwrap();
        assert!(done.resolve(OrderId::new("ORD2")).is_err());
        assert!(done.reject("late failure").is_err());
        assert_eq!(done.order_id().map(OrderId::as_str), Some("ORD1"));
    }

    #[test]
    fn test_close_allowed_only_in_idle_and_error() {
        let (mut success, _) = placing();
        success.resolve(OrderId::new("ORD1")).unwrap();
        assert!(!success.can_close());
        assert!(!success.view().closable());

        let (mut failed, _) = placing();
        failed.reject("nope").unwrap();
        assert!(failed.can_close());
        assert!(failed.view().closable());
    }

    #[test]
    fn test_new_order_resets_address_and_flag_not_cart() {
        let (mut checkout, cart) = placing();
        checkout.resolve(OrderId::new("ORD123")).unwrap();
        let cart_before = cart.clone();

        checkout.start_new_order().unwrap();

        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
        assert_eq!(checkout.address(), &Address::default());
        assert!(!checkout.attempted_submit());
        assert!(checkout.order().is_none());
        assert!(checkout.order_id().is_none());
        assert_eq!(cart, cart_before);
    }

    #[test]
    fn test_retry_resets_from_error() {
        let (mut checkout, _) = placing();
        checkout.reject("Sheet quota exceeded").unwrap();

        assert!(checkout.start_new_order().is_err());
        checkout.retry().unwrap();

        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
        assert_eq!(checkout.address(), &Address::default());
        assert!(!checkout.attempted_submit());
        assert!(checkout.error_message().is_none());
    }

    #[test]
    fn test_place_another_order_accepts_either_terminal_status() {
        let (mut success, _) = placing();
        success.resolve(OrderId::new("ORD1")).unwrap();
        success.place_another_order().unwrap();
        assert_eq!(success.status(), &CheckoutStatus::Idle);

        let (mut failed, _) = placing();
        failed.reject("nope").unwrap();
        failed.place_another_order().unwrap();
        assert_eq!(failed.status(), &CheckoutStatus::Idle);

        assert!(CheckoutController::new().place_another_order().is_err());
    }

    #[test]
    fn test_order_snapshot_survives_cart_edits() {
        let (mut checkout, mut cart) = placing();

        cart.update_quantity(1, 10);
        checkout.resolve(OrderId::new("ORD123")).unwrap();

        assert_eq!(checkout.order().unwrap().cart()[0].quantity, 2);
    }

    #[test]
    fn test_total_mismatch_refused_when_verified() {
        let cart = pizza_cart();
        let mut checkout = CheckoutController::new();
        checkout.set_address(valid_address()).unwrap();

        let err = checkout.confirm(&cart, Money::from_rupees(1)).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TotalMismatch { .. })
        ));
        assert_eq!(checkout.status(), &CheckoutStatus::Idle);
    }

    #[test]
    fn test_total_trusted_when_not_verified() {
        let cart = pizza_cart();
        let mut checkout = CheckoutController::with_policy(CheckoutPolicy {
            verify_total: false,
        });
        checkout.set_address(valid_address()).unwrap();

        let order = checkout.confirm(&cart, Money::from_rupees(1)).unwrap();

        assert_eq!(order.total(), Money::from_rupees(1));
    }

    #[test]
    fn test_view_titles() {
        let idle = CheckoutController::new().view();
        assert_eq!(idle.title(), "Cart");
        assert_eq!(CheckoutView::Placing.title(), "Order Status");
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let view = CheckoutView::Cart {
            show_address_warning: true,
            confirm_enabled: false,
        };
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            serde_json::json!({ "kind": "cart", "showAddressWarning": true, "confirmEnabled": false })
        );
    }
}
