//! Signed bearer token issuance and verification

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::identity::{LoggedIdentity, Role};
use crate::config::AuthConfig;
use crate::constants::BEARER_PREFIX;
use crate::error::{GatepostError, Result};

/// Why a token was rejected.
///
/// Callers outside the auth core never see these; the gate collapses them
/// into a single `Unauthenticated` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    InvalidSignature,
    Expired,
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "token signature is invalid"),
            Self::Expired => write!(f, "token has expired"),
            Self::Malformed => write!(f, "token is malformed"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated identity
    pub username: String,
    /// Role at the time of issue
    pub role: Role,
    /// Issued at (UTC timestamp)
    pub iat: usize,
    /// Expiration time (UTC timestamp)
    pub exp: usize,
}

impl Claims {
    /// Creates claims for an authenticated identity
    pub fn new(identity: &LoggedIdentity, lifetime: Duration) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs() as usize;

        Self {
            username: identity.username.clone(),
            role: identity.role,
            iat: now,
            exp: now + lifetime.as_secs() as usize,
        }
    }
}

/// Issues and verifies signed tokens.
///
/// Tokens are self-contained: validity is decided purely by signature and
/// expiry, with no server-side record. An issued token therefore stays
/// valid for its full lifetime even if the underlying account is modified
/// or deleted in the meantime. That is a deliberate statelessness
/// trade-off, not something this service tries to patch over.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    /// Creates a token service with an explicit secret and lifetime
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        let mut validation = Validation::default();
        // No grace period: expired means expired.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    /// Creates a token service from loaded configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_lifetime)
    }

    /// Issues a signed token for an authenticated identity
    pub fn issue(&self, identity: &LoggedIdentity) -> Result<String> {
        let claims = Claims::new(identity, self.lifetime);
        self.sign(&claims)
    }

    /// Signs an explicit claims value
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            log::error!("Token signing failed: {}", e);
            GatepostError::ConfigError(format!("Failed to sign token: {}", e))
        })
    }

    /// Verifies a token and returns the identity it asserts.
    ///
    /// The embedded username and role are returned verbatim; the store is
    /// not consulted again.
    pub fn verify(&self, token: &str) -> std::result::Result<LoggedIdentity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        Ok(LoggedIdentity {
            username: data.claims.username,
            role: data.claims.role,
        })
    }
}

/// Extracts a bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix(BEARER_PREFIX).filter(|t| !t.is_empty())
}
