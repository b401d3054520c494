//! Credential validation against the identity store

use std::sync::Arc;

use crate::auth::identity::{Identity, LoggedIdentity};
use crate::auth::password::PasswordHasher;
use crate::error::{GatepostError, Result};
use crate::storage::UserRepository;

/// A login attempt. Never persisted; dropped as soon as the comparison
/// is done.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Credential {
    /// Username or email address
    pub identifier: String,
    pub password: String,
}

/// Returns true when the identifier looks like an email address:
/// a non-empty local part, an '@', and a domain containing a dot.
pub fn looks_like_email(identifier: &str) -> bool {
    match identifier.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Proves that a presented credential matches a stored identity.
pub struct CredentialValidator {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
}

impl CredentialValidator {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Validate an identifier/password pair and return the reduced
    /// identity.
    ///
    /// An unknown identifier and a wrong password both surface as
    /// [`GatepostError::InvalidCredentials`]; the distinction is logged
    /// at debug level only, so the API cannot be used to enumerate
    /// usernames. At least one identifier is always required.
    pub async fn validate(&self, identifier: &str, password: &str) -> Result<LoggedIdentity> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(GatepostError::InvalidRequest(
                "username or email is required".to_string(),
            ));
        }

        let identity = match self.lookup(identifier).await? {
            Some(identity) => identity,
            None => {
                // Burn a hash's worth of work so a missing account costs
                // the same as a wrong password.
                let _ = self.hasher.hash(password);
                log::debug!("Login rejected: no identity for identifier");
                return Err(GatepostError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &identity.password_hash)? {
            log::debug!("Login rejected: password mismatch for '{}'", identity.username);
            return Err(GatepostError::InvalidCredentials);
        }

        Ok(identity.logged())
    }

    /// Resolve an identifier to a stored identity: username first, then
    /// email if the identifier is email-shaped.
    async fn lookup(&self, identifier: &str) -> Result<Option<Identity>> {
        if let Some(identity) = self.repo.find_by_username(identifier).await? {
            return Ok(Some(identity));
        }
        if looks_like_email(identifier) {
            return self.repo.find_by_email(&identifier.to_lowercase()).await;
        }
        Ok(None)
    }
}
