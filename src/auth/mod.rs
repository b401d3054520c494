//! Authentication and authorization core

pub mod accounts;
pub mod credentials;
pub mod gate;
pub mod identity;
pub mod password;
pub mod policy;
pub mod token;

// Re-export main components
pub use accounts::AccountService;
pub use credentials::{Credential, CredentialValidator};
pub use gate::AuthGate;
pub use identity::{Identity, LoggedIdentity, NewIdentity, Role};
pub use password::PasswordHasher;
pub use policy::{decide, AccessDecision, DenyReason, OperationSpec, Ownership};
pub use token::{Claims, TokenError, TokenService};
