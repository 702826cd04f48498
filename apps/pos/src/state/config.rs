//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TRIPUS_*`)
//! 2. Config file (`config.toml` in the platform config directory)
//! 3. Defaults (this file)
//!
//! The same file carries an `[email]` table, read by `tripus_notify::NotifyConfig`.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use tripus_core::DEFAULT_FORECAST_HORIZON;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Store name (shown in the CLI header and on exports)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Days covered by the aggregate revenue forecast
    pub forecast_horizon_days: usize,

    /// Simulated payment processing delay for non-credit checkouts
    pub payment_delay_ms: u64,

    /// Snapshot cache file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "TriPUS Store"
    /// - Currency: INR (₹)
    /// - Forecast: 30 days
    /// - Payment delay: 2 seconds
    fn default() -> Self {
        ConfigState {
            store_name: "TriPUS Store".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            forecast_horizon_days: DEFAULT_FORECAST_HORIZON,
            payment_delay_ms: 2000,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing or malformed file falls back to defaults (logged).
    pub fn load(config_path: Option<PathBuf>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                match std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|s| Self::from_toml(&s).map_err(|e| e.to_string()))
                {
                    Ok(loaded) => config = loaded,
                    Err(e) => warn!(?path, error = %e, "Failed to read config, using defaults"),
                }
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Parses top-level keys of a TOML document. Unknown tables are ignored.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies `TRIPUS_*` overrides using `lookup` to read variables.
    ///
    /// ## Environment Variables
    /// - `TRIPUS_STORE_NAME`
    /// - `TRIPUS_CURRENCY_SYMBOL`
    /// - `TRIPUS_FORECAST_HORIZON` (days)
    /// - `TRIPUS_PAYMENT_DELAY_MS`
    /// - `TRIPUS_DB_PATH`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TRIPUS_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("TRIPUS_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(days) = lookup("TRIPUS_FORECAST_HORIZON") {
            match days.parse::<usize>() {
                Ok(d) if d > 0 => self.forecast_horizon_days = d,
                _ => warn!(value = %days, "Ignoring invalid forecast horizon"),
            }
        }

        if let Some(delay) = lookup("TRIPUS_PAYMENT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.payment_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring invalid payment delay"),
            }
        }

        if let Some(path) = lookup("TRIPUS_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// `config.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tripus", "pos")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(249_700), "₹2497.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
