//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_GUEST_EMAIL` - Buyer email for checkouts without an account (default: guest@example.com)
//! - `STOREFRONT_SETTLE_WINDOW_MS` - How long a settled checkout stays visible (default: 5000)
//! - `STOREFRONT_STATUS_POLICY` - `permissive` or `forward-only` (default: permissive)
//! - `STOREFRONT_CLEAR_CART_ON_LOGOUT` - Empty the cart when signing out (default: true)
//! - `STOREFRONT_WISHLIST_PATH` - JSON file for the wishlist; in-memory when unset
//! - `STOREFRONT_TAX_RATE` - Estimated tax shown on the cart page, 0 to 1 (default: 0.08)
//! - `STOREFRONT_CHANNEL_CAPACITY` - Mailbox size of each store actor (default: 32)
//! - `STOREFRONT_CURRENCY_SYMBOL` - Prefix for displayed amounts (default: ₹)
//!
//! A variable that is set but blank counts as missing.

use crate::engine::tracker::TransitionPolicy;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub guest_email: String,
    pub settle_window: Duration,
    pub status_policy: TransitionPolicy,
    pub clear_cart_on_logout: bool,
    /// `None` keeps the wishlist in memory.
    pub wishlist_path: Option<PathBuf>,
    pub tax_rate: Decimal,
    pub channel_capacity: usize,
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guest_email: "guest@example.com".to_string(),
            settle_window: Duration::from_millis(5000),
            status_policy: TransitionPolicy::Permissive,
            clear_cart_on_logout: true,
            wishlist_path: None,
            tax_rate: Decimal::new(8, 2),
            channel_capacity: 32,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is blank or cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let guest_email = env.non_blank_or("STOREFRONT_GUEST_EMAIL", &defaults.guest_email)?;
        let settle_window = env
            .parsed::<u64>("STOREFRONT_SETTLE_WINDOW_MS")?
            .map_or(defaults.settle_window, Duration::from_millis);
        let status_policy = env
            .parsed::<TransitionPolicy>("STOREFRONT_STATUS_POLICY")?
            .unwrap_or(defaults.status_policy);
        let clear_cart_on_logout = match env.optional("STOREFRONT_CLEAR_CART_ON_LOGOUT") {
            Some(raw) => parse_bool("STOREFRONT_CLEAR_CART_ON_LOGOUT", &raw)?,
            None => defaults.clear_cart_on_logout,
        };
        let wishlist_path = env.optional("STOREFRONT_WISHLIST_PATH").map(PathBuf::from);

        let tax_rate = env
            .parsed::<Decimal>("STOREFRONT_TAX_RATE")?
            .unwrap_or(defaults.tax_rate);
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_TAX_RATE".to_string(),
                format!("{tax_rate} is outside 0..=1"),
            ));
        }

        let channel_capacity = env
            .parsed::<usize>("STOREFRONT_CHANNEL_CAPACITY")?
            .unwrap_or(defaults.channel_capacity);
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_CHANNEL_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let currency_symbol =
            env.non_blank_or("STOREFRONT_CURRENCY_SYMBOL", &defaults.currency_symbol)?;

        Ok(Self {
            guest_email,
            settle_window,
            status_policy,
            clear_cart_on_logout,
            wishlist_path,
            tax_rate,
            channel_capacity,
            currency_symbol,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value, `None` when unset or blank.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Default when unset; an explicitly blank value is an error.
    fn non_blank_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        match (self.0)(key) {
            None => Ok(default.to_string()),
            Some(raw) if raw.trim().is_empty() => Err(ConfigError::MissingEnvVar(key.to_string())),
            Some(raw) => Ok(raw.trim().to_string()),
        }
    }

    fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
            })
            .transpose()
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
