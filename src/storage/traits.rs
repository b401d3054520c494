//! Abstract storage interface for identity lookup
//!
//! The auth core treats persistence as an external collaborator and only
//! depends on this narrow trait. Locking, transactions, and timeout
//! discipline are entirely the backend's business; every call here is a
//! single atomic read or write with no cross-call transaction spanning.

use async_trait::async_trait;

use crate::auth::identity::Identity;
use crate::error::Result;

/// Identity lookup and maintenance interface.
///
/// Implementations must enforce username and email uniqueness: `insert`
/// returns `Conflict` on a duplicate, and lookups return at most one
/// record.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an identity by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>>;

    /// Find an identity by email. Callers pass the address already
    /// lowercased; stored emails are lowercase by invariant.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;

    /// Insert a new identity, failing with `Conflict` if the username or
    /// email is already taken
    async fn insert(&self, identity: Identity) -> Result<()>;

    /// Replace the stored password hash for a username.
    ///
    /// Last write wins: two concurrent changes to the same identity are
    /// not serialized here unless the backend provides conditional
    /// updates.
    async fn update_password_hash(&self, username: &str, password_hash: &str) -> Result<()>;
}
