//! # Submission Error Types
//!
//! Error types for order submission and checkout configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Submission Error Categories                         │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Remote      │  │      Transport          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Rejected       │  │  Transport (reqwest,    │ │
//! │  │  InvalidUrl     │  │  InvalidResponse│  │  passed through as-is)  │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checkout shows `to_string()` of whatever comes back, so a rejection
//! displays as the endpoint's own message and nothing more.

use thiserror::Error;

/// Result type alias for submission operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Order submission error.
#[derive(Debug, Error)]
pub enum SubmitError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid checkout configuration.
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),

    /// Invalid order endpoint URL.
    #[error("Invalid order endpoint URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The endpoint answered with a non-success status.
    ///
    /// `message` is the body's `message`, or the generic fallback text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The endpoint answered with success but the body is unusable.
    #[error("Invalid response from order endpoint: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// No response could be obtained.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::InvalidResponse(err.to_string())
    }
}

impl From<url::ParseError> for SubmitError {
    fn from(err: url::ParseError) -> Self {
        SubmitError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SubmitError {
    fn from(err: std::io::Error) -> Self {
        SubmitError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SubmitError {
    fn from(err: toml::de::Error) -> Self {
        SubmitError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SubmitError {
    fn from(err: toml::ser::Error) -> Self {
        SubmitError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SubmitError {
    /// Returns true if the endpoint answered but did not record the order.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SubmitError::Rejected { .. } | SubmitError::InvalidResponse(_)
        )
    }

    /// Returns true if no response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SubmitError::InvalidConfig(_)
                | SubmitError::InvalidUrl(_)
                | SubmitError::ConfigLoadFailed(_)
                | SubmitError::ConfigSaveFailed(_)
        )
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
