//! Login surface consumed by the transport layer

use serde::Serialize;

use crate::auth::credentials::{Credential, CredentialValidator};
use crate::auth::token::TokenService;
use crate::error::Result;

/// Successful login response body
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Validate a credential and issue a token for it.
///
/// The transport layer maps the error kinds to status codes; nothing is
/// re-wrapped here.
pub async fn login(
    validator: &CredentialValidator,
    tokens: &TokenService,
    credential: Credential,
) -> Result<LoginResponse> {
    let logged = validator
        .validate(&credential.identifier, &credential.password)
        .await?;
    let access_token = tokens.issue(&logged)?;
    log::debug!("Issued token for '{}'", logged.username);
    Ok(LoginResponse { access_token })
}
