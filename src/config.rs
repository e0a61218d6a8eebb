//! # Configuration
//!
//! Runtime knobs for the marketplace core, read from the environment with logged
//! defaults. Embedders that keep their own configuration file can deserialize
//! [`MarketConfig`] directly instead.

use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default quiet period before a debounced cart refresh fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Deserialized configuration is validated the same way as [`MarketConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMarketConfig")]
pub struct MarketConfig {
    /// Quiet period for debounced cart refreshes.
    pub debounce: Duration,
    /// Fraction of the subtotal charged as estimated tax.
    pub tax_rate: f64,
    /// ISO currency code reported on cart totals.
    pub currency: String,
    /// Mailbox size for every actor and the cart worker.
    pub channel_capacity: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            tax_rate: 0.0,
            currency: "USD".to_string(),
            channel_capacity: 32,
        }
    }
}

/// Unvalidated shape of [`MarketConfig`] as it appears in a configuration file.
#[derive(Deserialize)]
#[serde(default)]
struct RawMarketConfig {
    #[serde(with = "millis")]
    debounce: Duration,
    tax_rate: f64,
    currency: String,
    channel_capacity: usize,
}

impl Default for RawMarketConfig {
    fn default() -> Self {
        let MarketConfig {
            debounce,
            tax_rate,
            currency,
            channel_capacity,
        } = MarketConfig::default();
        Self {
            debounce,
            tax_rate,
            currency,
            channel_capacity,
        }
    }
}

impl TryFrom<RawMarketConfig> for MarketConfig {
    type Error = ConfigError;

    fn try_from(raw: RawMarketConfig) -> Result<Self, Self::Error> {
        let config = Self {
            debounce: raw.debounce,
            tax_rate: raw.tax_rate,
            currency: raw.currency,
            channel_capacity: raw.channel_capacity,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl MarketConfig {
    /// Loads the configuration from `MARKET_*` environment variables.
    ///
    /// Unset variables fall back to [`MarketConfig::default`]; malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let debounce_ms: u64 = try_load(&lookup, "MARKET_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let tax_rate: f64 = try_load(&lookup, "MARKET_TAX_RATE", defaults.tax_rate)?;
        let currency: String = try_load(&lookup, "MARKET_CURRENCY", defaults.currency)?;
        let channel_capacity: usize =
            try_load(&lookup, "MARKET_CHANNEL_CAPACITY", defaults.channel_capacity)?;

        let config = Self {
            debounce: Duration::from_millis(debounce_ms),
            tax_rate,
            currency,
            channel_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.tax_rate) {
            return Err(ConfigError::Invalid {
                key: "MARKET_TAX_RATE",
                value: self.tax_rate.to_string(),
                reason: "must be in [0, 1)".to_string(),
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "MARKET_CHANNEL_CAPACITY",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "MARKET_CURRENCY",
                value: self.currency.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }
        }),
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
