//! User repository: the persistence port and its SeaORM adapter.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, MSG_EMAIL_ALREADY_EXISTS, MSG_USER_NOT_FOUND};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Storage contract the domain service depends on.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user, in storage order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert the user, or overwrite the stored record with the same ID.
    /// Returns the record as stored.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Permanently remove the user
    async fn delete(&self, user: User) -> AppResult<()>;

    /// Check whether any user holds this exact email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// The unique index on `email` is the authoritative uniqueness guard.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(MSG_EMAIL_ALREADY_EXISTS),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let exists = UserEntity::find_by_id(user.id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .is_some();

        let active = ActiveModel::from(user);
        let model = if exists {
            active.update(&self.db).await
        } else {
            active.insert(&self.db).await
        }
        .map_err(map_write_error)?;

        Ok(User::from(model))
    }

    async fn delete(&self, user: User) -> AppResult<()> {
        let result = UserEntity::delete_by_id(user.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(MSG_USER_NOT_FOUND));
        }

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }
}
