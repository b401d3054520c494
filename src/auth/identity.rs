use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// A stored user record.
///
/// Username is unique and case-sensitive; email is unique and stored
/// lowercase. Both uniqueness invariants are enforced by the repository,
/// not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registration input. The plaintext password only lives long enough
/// to be hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// The reduced identity handed out after successful authentication.
///
/// This is the only shape that leaves the credential validator; the
/// password hash never travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedIdentity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn logged(&self) -> LoggedIdentity {
        LoggedIdentity {
            username: self.username.clone(),
            role: self.role,
        }
    }
}
