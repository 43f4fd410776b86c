//! In-memory user repository.
//!
//! Backs the service when `STORAGE_BACKEND=memory` and in tests. Email
//! uniqueness is enforced on save, mirroring the database unique index.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{User, MSG_EMAIL_ALREADY_EXISTS, MSG_USER_NOT_FOUND};

use super::UserRepository;

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemoryUserRepository {
    fn with_users(users: Vec<User>) -> Self {
        let users = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|other| other.id != user.id && other.email == user.email);
        if taken {
            return Err(AppError::conflict(MSG_EMAIL_ALREADY_EXISTS));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, user: User) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&user.id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(MSG_USER_NOT_FOUND))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(
            Uuid::new_v4(),
            "Test".to_string(),
            email.to_string(),
            "hashed".to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_inserts_then_overwrites() {
        let repo = InMemoryUserRepository::new();
        let mut stored = repo.save(user("test@gmail.com")).await.unwrap();

        stored.name = "Renamed".to_string();
        repo.save(stored.clone()).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(stored.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_save_rejects_taken_email() {
        let repo = InMemoryUserRepository::with_users(vec![user("test@gmail.com")]);

        let result = repo.save(user("test@gmail.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == MSG_EMAIL_ALREADY_EXISTS));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let repo = InMemoryUserRepository::with_users(vec![user("test@gmail.com")]);

        assert!(repo.exists_by_email("test@gmail.com").await.unwrap());
        assert!(!repo.exists_by_email("TEST@gmail.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.delete(user("ghost@gmail.com")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repo.is_empty().await);
    }
}
