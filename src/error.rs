use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatepostError {
    // Request errors
    InvalidRequest(String),

    // Credential errors
    /// Unknown identity and wrong password deliberately collapse into this
    /// one variant so callers cannot enumerate usernames.
    InvalidCredentials,

    // Token errors
    /// Missing, malformed, expired, or tampered token. The specific cause
    /// is logged but never exposed.
    Unauthenticated,

    // Authorization errors
    Forbidden,

    // Storage errors
    Conflict(String),
    StorageError(String),
    /// A stored password hash failed to parse. Fatal for the affected
    /// account; must be alerted on, never bypassed.
    CorruptCredentialStore(String),

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for GatepostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::InvalidCredentials => write!(f, "Invalid username or password"),
            Self::Unauthenticated => write!(f, "Authentication required"),
            Self::Forbidden => write!(f, "Forbidden: insufficient permissions"),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::CorruptCredentialStore(msg) => {
                write!(f, "Corrupt credential store: {}", msg)
            }
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for GatepostError {}

// Generic result type for gatepost
pub type Result<T> = std::result::Result<T, GatepostError>;
