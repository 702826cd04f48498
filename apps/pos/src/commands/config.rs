//! # Config Commands
//!
//! Application configuration and the email sender settings.
//!
//! `ConfigState` is read-only after startup. Sender settings are user data
//! kept in the snapshot cache under `email-settings`.

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};
use tripus_core::validation::validate_email;
use tripus_core::{CoreError, EmailSettings};

/// Gets the current application configuration.
///
/// ## When Used
/// - Startup (store name in the header)
/// - Currency formatting of totals
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Stored sender settings, or empty defaults.
pub async fn get_email_settings(store: &StoreState) -> EmailSettings {
    debug!("get_email_settings command");
    store.inner().snapshots().load_email_settings().await
}

/// Saves sender settings.
///
/// ## Errors
/// - `INVALID_INPUT` when a non-empty sender address has no `@`
/// - `STORAGE_ERROR` when the cache write fails; unlike sale data this is
///   reported, since nothing else holds the settings
pub async fn save_email_settings(
    store: &StoreState,
    settings: EmailSettings,
) -> Result<EmailSettings, ApiError> {
    debug!(sender = %settings.sender_email, "save_email_settings command");

    let settings = EmailSettings {
        api_key: settings.api_key.trim().to_string(),
        sender_email: settings.sender_email.trim().to_string(),
        sender_name: settings.sender_name.trim().to_string(),
    };
    if !settings.sender_email.is_empty() {
        validate_email(&settings.sender_email).map_err(CoreError::from)?;
    }

    store.inner().snapshots().save_email_settings(&settings).await?;
    info!(configured = settings.is_configured(), "Email settings saved");
    Ok(settings)
}
