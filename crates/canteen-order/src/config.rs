//! # Checkout Configuration
//!
//! Where orders are sent and which checks run at confirm time.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CANTEEN_ORDER_ENDPOINT=https://orders.example.com/api/orders       │
//! │     CANTEEN_VERIFY_TOTAL=false                                         │
//! │     CANTEEN_USER_AGENT=lobby-kiosk/2                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kiosk/checkout.toml (Linux)                              │
//! │     ~/Library/Application Support/com.canteen.kiosk/checkout.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [endpoint]
//! url = "http://localhost:3000/api/google-sheets"
//! user_agent = "canteen-kiosk/0.1"
//!
//! [checkout]
//! verify_total = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use canteen_core::CheckoutPolicy;

use crate::error::{SubmitError, SubmitResult};

// =============================================================================
// Endpoint Settings
// =============================================================================

/// The order-recording endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Absolute `http`/`https` URL that accepts the order POST.
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// `User-Agent` header sent with each submission.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_endpoint_url() -> String {
    "http://localhost:3000/api/google-sheets".to_string()
}

fn default_user_agent() -> String {
    format!("canteen-kiosk/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for EndpointSettings {
    fn default() -> Self {
        EndpointSettings {
            url: default_endpoint_url(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Confirm-time checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Recompute the cart total at confirm and refuse a mismatch.
    #[serde(default = "default_true")]
    pub verify_total: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            verify_total: default_true(),
        }
    }
}

// =============================================================================
// Main Checkout Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub endpoint: EndpointSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SubmitResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SubmitResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SubmitError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SubmitError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SubmitError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SubmitResult<()> {
        self.endpoint_url()?;

        if self.endpoint.user_agent.trim().is_empty() {
            return Err(SubmitError::InvalidConfig(
                "user_agent must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Parses the endpoint URL; only `http` and `https` are accepted.
    pub fn endpoint_url(&self) -> SubmitResult<Url> {
        let url = Url::parse(&self.endpoint.url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SubmitError::InvalidUrl(format!(
                "Order endpoint must use http:// or https://, got: {}://",
                other
            ))),
        }
    }

    /// The confirm-time checks for the checkout controller.
    pub fn policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            verify_total: self.checkout.verify_total,
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CANTEEN_ORDER_ENDPOINT") {
            debug!(url = %url, "Overriding order endpoint from environment");
            self.endpoint.url = url;
        }

        if let Ok(agent) = std::env::var("CANTEEN_USER_AGENT") {
            self.endpoint.user_agent = agent;
        }

        if let Ok(verify) = std::env::var("CANTEEN_VERIFY_TOTAL") {
            match verify.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.checkout.verify_total = true,
                "0" | "false" | "no" | "off" => self.checkout.verify_total = false,
                _ => warn!(value = %verify, "Unknown CANTEEN_VERIFY_TOTAL value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "canteen", "kiosk")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }
}
