//! Account lifecycle operations that touch credentials
//!
//! Registration and password change are the two store-writing operations
//! the auth core owns, because both must pass through the hasher. All
//! other user CRUD belongs to the surrounding application.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::auth::identity::{Identity, LoggedIdentity, NewIdentity};
use crate::auth::password::PasswordHasher;
use crate::error::{GatepostError, Result};
use crate::storage::UserRepository;

pub struct AccountService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Register a new identity.
    ///
    /// The email is lowercased before storage, the role defaults to
    /// `user`, and a duplicate username or email surfaces the store's
    /// `Conflict` unchanged.
    pub async fn register(&self, new: NewIdentity) -> Result<LoggedIdentity> {
        let username = new.username.trim().to_string();
        if username.is_empty() {
            return Err(GatepostError::InvalidRequest(
                "username is required".to_string(),
            ));
        }
        let email = new.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(GatepostError::InvalidRequest(
                "email is required".to_string(),
            ));
        }

        let identity = Identity {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: self.hasher.hash(&new.password)?,
            role: new.role.unwrap_or_default(),
            created_at: Utc::now(),
        };
        let logged = identity.logged();
        self.repo.insert(identity).await?;

        log::debug!("Registered identity '{}'", logged.username);
        Ok(logged)
    }

    /// Replace a password after re-proving the current one.
    ///
    /// An unknown username and a wrong current password both surface as
    /// `InvalidCredentials`. Two concurrent changes to the same identity
    /// race at the repository: last write wins unless the backend offers
    /// conditional updates.
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let identity = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(GatepostError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(current_password, &identity.password_hash)?
        {
            return Err(GatepostError::InvalidCredentials);
        }

        let new_hash = self.hasher.hash(new_password)?;
        self.repo
            .update_password_hash(&identity.username, &new_hash)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;
    use crate::storage::MemoryUserRepository;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(PasswordHasher::with_params(64, 1, 1).unwrap()),
        )
    }

    fn alice() -> NewIdentity {
        NewIdentity {
            username: "alice".to_string(),
            email: "Alice@Example.COM".to_string(),
            password: "hunter2-hunter2".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_and_normalizes() {
        let service = service();
        let logged = service.register(alice()).await.unwrap();
        assert_eq!(logged.role, Role::User);

        let stored = service
            .repo
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.email, "alice@example.com");
        assert_ne!(stored.password_hash, "hunter2-hunter2");
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let service = service();
        service.register(alice()).await.unwrap();
        let result = service.register(alice()).await;
        assert!(matches!(result, Err(GatepostError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_requires_username() {
        let service = service();
        let mut new = alice();
        new.username = "  ".to_string();
        let result = service.register(new).await;
        assert!(matches!(result, Err(GatepostError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let service = service();
        service.register(alice()).await.unwrap();

        let wrong = service
            .change_password("alice", "not-the-password", "next-password")
            .await;
        assert_eq!(wrong, Err(GatepostError::InvalidCredentials));

        service
            .change_password("alice", "hunter2-hunter2", "next-password")
            .await
            .unwrap();

        let stored = service
            .repo
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert!(service
            .hasher
            .verify("next-password", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_change_password_unknown_user_is_invalid_credentials() {
        let service = service();
        let result = service
            .change_password("ghost", "whatever", "next-password")
            .await;
        assert_eq!(result, Err(GatepostError::InvalidCredentials));
    }
}
