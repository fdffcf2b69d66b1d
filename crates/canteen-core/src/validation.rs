//! # Validation Module
//!
//! Input validation for the checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Selection inputs (kiosk CLI / view)                          │
//! │  └── validate_address_choice: value is in the field's list            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout confirm (CheckoutController)                        │
//! │  ├── validate_address: every field filled in                           │
//! │  └── validate_total: supplied total matches the line items             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order-recording endpoint (external)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use canteen_core::validation::{validate_address, validate_address_choice};
//! use canteen_core::{Address, AddressField};
//!
//! assert!(validate_address_choice(AddressField::Tower, "18").is_ok());
//! assert!(validate_address_choice(AddressField::Tower, "19").is_err());
//!
//! assert!(validate_address(&Address::new("3", "5", "002")).is_ok());
//! assert!(validate_address(&Address::default()).is_err());
//! ```

use crate::address::{Address, AddressField};
use crate::cart::{Cart, LineItem};
use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Address Validators
// =============================================================================

/// Checks that every address field is filled in.
///
/// Domain membership is not checked here; see [`validate_address_choice`].
pub fn validate_address(address: &Address) -> ValidationResult<()> {
    let fields = address.missing_fields();
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingAddressFields { fields })
    }
}

/// Checks that a selection-input value is one the field offers.
pub fn validate_address_choice(field: AddressField, value: &str) -> ValidationResult<()> {
    let allowed = field.options();
    if allowed.iter().any(|option| option == value) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: field.to_string(),
            allowed,
        })
    }
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a unit price.
///
/// Zero is allowed (complimentary items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates one line item.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_price(item.unit_price).map_err(|_| ValidationError::MustBeNonNegative {
        field: format!("price of {}", item.name),
    })?;

    if item.checked_line_total().is_none() {
        return Err(ValidationError::AmountOutOfRange {
            field: format!("line total of {}", item.name),
        });
    }

    Ok(())
}

/// Validates every line item of a cart, e.g. after loading it from a file.
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    cart.items().iter().try_for_each(validate_line_item)?;

    if cart.checked_total().is_none() {
        return Err(ValidationError::AmountOutOfRange {
            field: "cart total".to_string(),
        });
    }

    Ok(())
}

/// Checks a caller-supplied total against the cart's line items.
pub fn validate_total(cart: &Cart, supplied: Money) -> ValidationResult<()> {
    let computed = cart.total();
    if computed != supplied {
        return Err(ValidationError::TotalMismatch { supplied, computed });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
