//! # Notify Configuration
//!
//! Where the send-email endpoint lives and how long to wait for it.
//!
//! ## Configuration File
//! The `[email]` section of the app's `config.toml`:
//! ```toml
//! [email]
//! endpoint = "http://localhost:3000/api/send-email"
//! timeout_secs = 15
//! ```
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. `[email]` section of the config file
//! 3. Environment variables (`TRIPUS_EMAIL_ENDPOINT`, `TRIPUS_EMAIL_TIMEOUT_SECS`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{NotifyError, NotifyResult};

/// Default endpoint of the email collaborator.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/send-email";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Email collaborator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Full URL of the send-email endpoint.
    pub endpoint: String,

    /// Request timeout.
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Only the `[email]` table of the shared config file is read here.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    email: NotifyConfig,
}

impl NotifyConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> NotifyResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading email config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using default email config");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load email config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses the `[email]` section of a TOML document.
    pub fn from_toml(contents: &str) -> NotifyResult<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.email)
    }

    fn from_file(path: &Path) -> NotifyResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Applies `TRIPUS_EMAIL_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("TRIPUS_EMAIL_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding email endpoint from environment");
            self.endpoint = endpoint;
        }

        if let Some(timeout) = lookup("TRIPUS_EMAIL_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid email timeout"),
            }
        }
    }

    pub fn validate(&self) -> NotifyResult<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(NotifyError::InvalidConfig(format!(
                "Email endpoint must start with http:// or https://, got: {}",
                self.endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(NotifyError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `config.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tripus", "pos")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotifyConfig::default();
        assert_eq!(config.endpoint, "http://localhost:3000/api/send-email");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_email_section_parsed() {
        let toml = r#"
            store_name = "Corner Shop"

            [email]
            endpoint = "https://mail.example.com/send"
            timeout_secs = 5
        "#;

        let config = NotifyConfig::from_toml(toml).unwrap();
        assert_eq!(config.endpoint, "https://mail.example.com/send");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = NotifyConfig::from_toml("store_name = \"Corner Shop\"").unwrap();
        assert_eq!(config, NotifyConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = NotifyConfig::from_toml("[email]\ntimeout_secs = 3").unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = NotifyConfig::default();
        config.apply_overrides(|key| match key {
            "TRIPUS_EMAIL_ENDPOINT" => Some("http://10.0.0.5/send".to_string()),
            "TRIPUS_EMAIL_TIMEOUT_SECS" => Some("not-a-number".to_string()),
            _ => None,
        });

        assert_eq!(config.endpoint, "http://10.0.0.5/send");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = NotifyConfig {
            endpoint: "localhost:3000".to_string(),
            ..NotifyConfig::default()
        };
        assert!(matches!(config.validate(), Err(NotifyError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_load_error() {
        let err = NotifyConfig::from_toml("[email\nendpoint=").unwrap_err();
        assert!(matches!(err, NotifyError::ConfigLoadFailed(_)));
    }
}
