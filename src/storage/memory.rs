//! In-memory identity storage for development and testing
//!
//! Keeps all identities in memory behind an async lock. Suitable for
//! tests or small single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::UserRepository;
use crate::auth::identity::Identity;
use crate::error::{GatepostError, Result};

/// In-memory user repository
pub struct MemoryUserRepository {
    // username -> identity; emails are indexed separately to keep the
    // uniqueness check O(1)
    users: Arc<RwLock<HashMap<String, Identity>>>,
    email_index: Arc<RwLock<HashMap<String, String>>>, // email -> username
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        // Copy the username out and release the index guard before
        // touching the user map; holding both here would invert the
        // lock order taken by `insert`.
        let username = match self.email_index.read().await.get(email) {
            Some(username) => username.clone(),
            None => return Ok(None),
        };
        Ok(self.users.read().await.get(&username).cloned())
    }

    async fn insert(&self, identity: Identity) -> Result<()> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if users.contains_key(&identity.username) {
            return Err(GatepostError::Conflict(format!(
                "username '{}' already exists",
                identity.username
            )));
        }
        if email_index.contains_key(&identity.email) {
            return Err(GatepostError::Conflict(format!(
                "email '{}' already exists",
                identity.email
            )));
        }

        email_index.insert(identity.email.clone(), identity.username.clone());
        users.insert(identity.username.clone(), identity);
        Ok(())
    }

    async fn update_password_hash(&self, username: &str, password_hash: &str) -> Result<()> {
        let mut users = self.users.write().await;
        match users.get_mut(username) {
            Some(identity) => {
                identity.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(GatepostError::StorageError(format!(
                "no identity for username '{}'",
                username
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;
    use chrono::Utc;
    use uuid::Uuid;

    fn identity(username: &str, email: &str) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = MemoryUserRepository::new();
        repo.insert(identity("alice", "alice@example.com"))
            .await
            .unwrap();

        let by_name = repo.find_by_username("alice").await.unwrap();
        assert!(by_name.is_some());

        let by_email = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        let repo = MemoryUserRepository::new();
        repo.insert(identity("Alice", "alice@example.com"))
            .await
            .unwrap();
        assert!(repo.find_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.insert(identity("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = repo.insert(identity("alice", "other@example.com")).await;
        assert!(matches!(result, Err(GatepostError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.insert(identity("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = repo.insert(identity("bob", "alice@example.com")).await;
        assert!(matches!(result, Err(GatepostError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_password_hash() {
        let repo = MemoryUserRepository::new();
        repo.insert(identity("alice", "alice@example.com"))
            .await
            .unwrap();
        repo.update_password_hash("alice", "$argon2id$replacement")
            .await
            .unwrap();
        let stored = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "$argon2id$replacement");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_insert_and_email_lookup_make_progress() {
        let repo = Arc::new(MemoryUserRepository::new());

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    repo.insert(identity(
                        &format!("user{}", i),
                        &format!("user{}@example.com", i),
                    ))
                    .await
                    .unwrap();
                }
            })
        };
        let reader = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for _ in 0..1000 {
                    let _ = repo.find_by_email("user0@example.com").await.unwrap();
                }
            })
        };

        tokio::time::timeout(std::time::Duration::from_secs(30), async {
            writer.await.unwrap();
            reader.await.unwrap();
        })
        .await
        .expect("concurrent insert and email lookup must not block each other");
    }

    #[tokio::test]
    async fn test_update_password_hash_unknown_user() {
        let repo = MemoryUserRepository::new();
        let result = repo.update_password_hash("ghost", "$argon2id$x").await;
        assert!(matches!(result, Err(GatepostError::StorageError(_))));
    }
}
