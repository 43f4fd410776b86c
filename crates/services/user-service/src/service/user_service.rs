//! User service - Handles user-related business logic.
//!
//! Enforces the required-field, existence and email uniqueness rules and
//! orchestrates calls to the repository. Holds no state of its own.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    DomainError, NewUser, Password, User, UserPatch, MSG_EMAIL_ALREADY_EXISTS, MSG_FIELDS_NULL,
    MSG_USER_NOT_FOUND,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users, in whatever order storage yields them
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create a new user with a freshly assigned ID
    async fn create_user(&self, candidate: NewUser) -> AppResult<User>;

    /// Overwrite the name and/or email of an existing user
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> AppResult<User>;

    /// Permanently delete an existing user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Check whether an email is already taken
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(MSG_USER_NOT_FOUND)
    }

    async fn create_user(&self, candidate: NewUser) -> AppResult<User> {
        if self.email_exists(&candidate.email).await? {
            tracing::debug!("Rejected user creation: email already taken");
            return Err(DomainError::conflict(MSG_EMAIL_ALREADY_EXISTS).into());
        }

        let password = Password::new(&candidate.password)?;
        let user = User::new(
            Uuid::new_v4(),
            candidate.name,
            candidate.email,
            password.into_string(),
        );

        let user = self.repo.save(user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> AppResult<User> {
        // Must run before the lookup: an empty patch is rejected even for unknown ids
        let patch = patch.normalized();
        if patch.is_empty() {
            tracing::debug!(user_id = %id, "Rejected user update: no fields supplied");
            return Err(DomainError::invalid_input(MSG_FIELDS_NULL).into());
        }

        let mut user = self.get_user(id).await?;

        if let Some(email) = patch.email() {
            if email != user.email && self.email_exists(email).await? {
                tracing::debug!(user_id = %id, "Rejected user update: email already taken");
                return Err(DomainError::conflict(MSG_EMAIL_ALREADY_EXISTS).into());
            }
        }

        user.apply(patch);
        let user = self.repo.save(user).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let user = self.get_user(id).await?;
        self.repo.delete(user).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.repo.exists_by_email(email).await
    }
}
