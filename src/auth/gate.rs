//! Request-level authentication gate

use crate::auth::identity::LoggedIdentity;
use crate::auth::token::{extract_bearer_token, TokenService};
use crate::error::{GatepostError, Result};

/// Turns a raw Authorization header into a caller context.
///
/// Every failure mode — missing header, wrong scheme, malformed token,
/// expired token, bad signature — is reported uniformly as
/// `Unauthenticated`. The fine-grained cause goes to the debug log only,
/// so clients cannot probe the validation internals.
pub struct AuthGate {
    tokens: TokenService,
}

impl AuthGate {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    /// Authenticate a request from its raw Authorization header value
    pub fn authenticate(&self, raw_header: Option<&str>) -> Result<LoggedIdentity> {
        let header = raw_header.ok_or_else(|| {
            log::debug!("Request rejected: no Authorization header");
            GatepostError::Unauthenticated
        })?;

        let token = extract_bearer_token(header).ok_or_else(|| {
            log::debug!("Request rejected: Authorization header is not a bearer token");
            GatepostError::Unauthenticated
        })?;

        self.tokens.verify(token).map_err(|e| {
            log::debug!("Request rejected: {}", e);
            GatepostError::Unauthenticated
        })
    }
}
