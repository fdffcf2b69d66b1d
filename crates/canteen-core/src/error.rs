//! # Error Types
//!
//! Domain-specific error types for canteen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  canteen-core errors (this file)                                       │
//! │  ├── CoreError        - Checkout state machine violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  canteen-order errors (separate crate)                                 │
//! │  └── SubmitError      - Endpoint rejections and transport failures     │
//! │                                                                         │
//! │  CheckoutService calls return CoreResult. A SubmitError never reaches  │
//! │  the caller: its message becomes the `error` status.                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → View                              │
//! │        SubmitError → CheckoutStatus::Error → View                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, amounts, status)
//! 3. Errors are enum variants, never String
//! 4. Validation errors display as the text the view shows the user

use thiserror::Error;

use crate::address::AddressField;
use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout state machine errors.
///
/// Every variant leaves the controller in the state it was in before the
/// rejected action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested action is not accepted in the current status.
    ///
    /// ## When This Occurs
    /// - Confirming while an order is already being placed
    /// - Settling a submission when none is in flight
    /// - Starting a new order from `idle`
    #[error("Cannot {action} while checkout is {status}")]
    InvalidTransition {
        action: &'static str,
        status: &'static str,
    },

    /// Cart or address edits are locked because checkout has left `idle`.
    #[error("Checkout is {status}; the cart and address cannot be edited")]
    EditingLocked { status: &'static str },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true if the error is a user-input problem shown inline.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are local and non-fatal: the checkout stays `idle` and the view
/// surfaces them inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more delivery address fields are empty.
    #[error("Please fill out all address fields.")]
    MissingAddressFields { fields: Vec<AddressField> },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// An amount is too large to represent in paise.
    #[error("{field} is out of range")]
    AmountOutOfRange { field: String },

    /// The total passed to checkout does not match the cart's line items.
    #[error("Order total {supplied} does not match cart total {computed}")]
    TotalMismatch { supplied: Money, computed: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
