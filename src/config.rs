//! Auth core configuration module
//! Handles the signing secret and token lifetime parameters

use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_TOKEN_LIFETIME_SECS, MIN_SECRET_LENGTH};
use crate::error::{GatepostError, Result};

/// Configuration for the authentication core
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify tokens. Read once at startup,
    /// immutable afterwards.
    pub jwt_secret: String,
    /// How long an issued token stays valid
    pub token_lifetime: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        panic!("AuthConfig::default() is not allowed for security reasons. Use AuthConfig::from_env() instead.");
    }
}

impl AuthConfig {
    /// Create a test configuration - DANGEROUS: Only for testing!
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            jwt_secret: "unit-test-signing-key-0123456789-never-use-in-production".to_string(),
            token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS),
        }
    }

    /// Validate that the signing secret meets security requirements
    fn validate_jwt_secret(secret: &str) -> Result<()> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(GatepostError::ConfigError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LENGTH
            )));
        }

        // Check for insecure default or example values
        let insecure_patterns = [
            "your-secret-key",
            "change-this",
            "default",
            "secret",
            "password",
            "12345",
        ];

        for pattern in &insecure_patterns {
            if secret.contains(pattern) {
                return Err(GatepostError::ConfigError(format!(
                    "JWT secret contains insecure pattern '{}'. Generate a secure secret with: openssl rand -base64 32",
                    pattern
                )));
            }
        }

        if secret.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GatepostError::ConfigError(
                "JWT secret should contain mixed characters (letters, numbers, symbols)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// A missing `JWT_SECRET` is a startup-fatal configuration error,
    /// never a per-request one.
    pub fn from_env() -> Result<Self> {
        // Pick up a local .env file if present; real env vars win.
        let _ = dotenvy::dotenv();

        let jwt_secret = env::var("GATEPOST_JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET"))
            .map_err(|_| {
                GatepostError::ConfigError(
                    "JWT_SECRET environment variable is required. \
                     Generate one with: openssl rand -base64 32"
                        .to_string(),
                )
            })?;

        Self::validate_jwt_secret(&jwt_secret)?;

        let token_lifetime_secs = env::var("GATEPOST_TOKEN_LIFETIME_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        if token_lifetime_secs == 0 {
            return Err(GatepostError::ConfigError(
                "GATEPOST_TOKEN_LIFETIME_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            jwt_secret,
            token_lifetime: Duration::from_secs(token_lifetime_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "AuthConfig::default() is not allowed for security reasons")]
    fn test_default_panics() {
        let _ = AuthConfig::default();
    }

    #[test]
    fn test_for_testing_works_in_tests() {
        let config = AuthConfig::for_testing();
        assert!(config.jwt_secret.contains("test"));
        assert_eq!(
            config.token_lifetime,
            Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS)
        );
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = AuthConfig::validate_jwt_secret("too-short");
        assert!(result.is_err());
    }

    #[test]
    fn test_insecure_pattern_rejected() {
        let result =
            AuthConfig::validate_jwt_secret("change-this-change-this-change-this-000");
        assert!(result.is_err());
    }

    #[test]
    fn test_alphabetic_only_secret_rejected() {
        let result =
            AuthConfig::validate_jwt_secret("abcdefghijklmnopqrstuvwxyzABCDEFGH");
        assert!(result.is_err());
    }

    #[test]
    fn test_strong_secret_accepted() {
        let result =
            AuthConfig::validate_jwt_secret("u8F!kQ2p-zX9vM4w+L7nR3tY6bC1dE5g");
        assert!(result.is_ok());
    }
}
