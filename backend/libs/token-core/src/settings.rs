//! Environment-backed token settings
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (debug builds only)
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | required |
//! | `JWT_VALIDITY_HOURS` | `72` |
//!
//! # Example
//!
//! ```no_run
//! use token_core::TokenSettings;
//!
//! let settings = TokenSettings::load()?;
//! let issuer = settings.issuer();
//! let validator = settings.validator();
//! # Ok::<(), token_core::AuthError>(())
//! ```

use std::env;

use chrono::Duration;
use tracing::{info, warn};

use crate::claims::STANDARD_VALIDITY;
use crate::error::{AuthError, Result};
use crate::issuer::TokenIssuer;
use crate::secret::{SecretStrength, SigningSecret};
use crate::validator::TokenValidator;

pub const SECRET_ENV: &str = "JWT_SECRET";
pub const VALIDITY_HOURS_ENV: &str = "JWT_VALIDITY_HOURS";

/// Signing secret and issuance window for one service
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: SigningSecret,
    pub validity: Duration,
}

impl TokenSettings {
    /// Load settings, reading a `.env` file first in debug builds
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Self::from_env()
    }

    /// Load settings from environment variables only
    ///
    /// ## Errors
    ///
    /// [`AuthError::Configuration`] when `JWT_SECRET` is unset or empty, or
    /// `JWT_VALIDITY_HOURS` is not a positive integer
    pub fn from_env() -> Result<Self> {
        let secret = env::var(SECRET_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AuthError::Configuration(format!("{} must be set", SECRET_ENV)))?;

        let validity_hours: i64 = env::var(VALIDITY_HOURS_ENV)
            .unwrap_or_else(|_| STANDARD_VALIDITY.num_hours().to_string())
            .parse()
            .map_err(|_| AuthError::Configuration(format!("Invalid {}", VALIDITY_HOURS_ENV)))?;

        Self::new(SigningSecret::new(secret), validity_hours)
    }

    /// Build settings from explicit values
    pub fn new(secret: SigningSecret, validity_hours: i64) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::Configuration(
                "signing secret is empty".to_string(),
            ));
        }

        if validity_hours <= 0 {
            return Err(AuthError::Configuration(format!(
                "{} must be positive, got {}",
                VALIDITY_HOURS_ENV, validity_hours
            )));
        }

        let validity = Duration::try_hours(validity_hours).ok_or_else(|| {
            AuthError::Configuration(format!("{} is out of range", VALIDITY_HOURS_ENV))
        })?;

        match secret.strength() {
            SecretStrength::Weak => warn!(
                secret_len = secret.len(),
                "Signing secret is weak; use at least 32 random bytes"
            ),
            SecretStrength::Acceptable | SecretStrength::Strong => {}
        }

        info!(validity_hours, "Token settings loaded");

        Ok(Self { secret, validity })
    }

    pub fn issuer(&self) -> TokenIssuer {
        TokenIssuer::new(self.secret.clone()).with_validity(self.validity)
    }

    pub fn validator(&self) -> TokenValidator {
        TokenValidator::new(self.secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(SECRET_ENV);
        env::remove_var(VALIDITY_HOURS_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var(SECRET_ENV, "env-secret");

        let settings = TokenSettings::from_env().expect("settings");
        assert_eq!(settings.validity, STANDARD_VALIDITY);
        assert_eq!(settings.secret.len(), "env-secret".len());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_validity() {
        clear_env();
        env::set_var(SECRET_ENV, "env-secret");
        env::set_var(VALIDITY_HOURS_ENV, "24");

        let settings = TokenSettings::from_env().expect("settings");
        assert_eq!(settings.validity, Duration::hours(24));
        assert_eq!(settings.issuer().validity(), Duration::hours(24));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_configuration_error() {
        clear_env();

        let err = TokenSettings::from_env().unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
        assert!(err.to_string().contains(SECRET_ENV));
    }

    #[test]
    #[serial]
    fn test_empty_secret_is_configuration_error() {
        clear_env();
        env::set_var(SECRET_ENV, "");

        assert!(matches!(
            TokenSettings::from_env(),
            Err(AuthError::Configuration(_))
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_validity_is_configuration_error() {
        clear_env();
        env::set_var(SECRET_ENV, "env-secret");

        for bad in ["abc", "0", "-5"] {
            env::set_var(VALIDITY_HOURS_ENV, bad);
            assert!(
                matches!(TokenSettings::from_env(), Err(AuthError::Configuration(_))),
                "value {:?}",
                bad
            );
        }

        clear_env();
    }

    #[test]
    fn test_new_rejects_empty_secret() {
        assert!(TokenSettings::new(SigningSecret::new(""), 72).is_err());
    }
}
