//! # Kiosk Error Type
//!
//! Everything that stops the kiosk before it can show a checkout screen.
//! A failed submission is not one of these: it ends as the "Oops!" screen.

use std::path::PathBuf;

use canteen_core::{CoreError, ValidationError};
use canteen_order::SubmitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KioskError {
    /// The cart file could not be read.
    #[error("Failed to read cart file {path}: {source}")]
    CartFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cart file is not a JSON array of line items.
    #[error("Invalid cart file: {0}")]
    CartFormat(#[from] serde_json::Error),

    /// A line item breaks a cart rule.
    #[error("Invalid cart: {0}")]
    InvalidCart(#[from] ValidationError),

    /// Configuration or HTTP client setup failed.
    #[error(transparent)]
    Setup(#[from] SubmitError),

    /// The checkout refused an action.
    #[error(transparent)]
    Checkout(#[from] CoreError),
}

pub type KioskResult<T> = Result<T, KioskError>;
