//! User repository implementation.
//!
//! Only the credential columns are written here: email, password hash and
//! the premium flag.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new, non-premium user
    async fn create(&self, email: String, hashed_password: String) -> AppResult<User>;

    /// Replace email and password hash
    async fn update_credentials(
        &self,
        id: Uuid,
        email: String,
        hashed_password: String,
    ) -> AppResult<User>;

    /// Set the premium flag
    async fn set_premium(&self, id: Uuid, is_premium: bool) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()
    }
}

/// The unique index on `email` is the final arbiter when two writers race.
fn email_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, hashed_password: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            hashed_password: Set(hashed_password),
            is_premium: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(email_conflict)?;
        Ok(User::from(model))
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        email: String,
        hashed_password: String,
    ) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.email = Set(email);
        active.hashed_password = Set(hashed_password);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(email_conflict)?;
        Ok(User::from(model))
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.is_premium = Set(is_premium);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
