//! Refresh token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use super::entities::refresh_token::{self, ActiveModel, Entity as RefreshTokenEntity};
use common::{AppError, AppResult};
use domain::RefreshToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Refresh token persistence. Rows are inserted and revoked, never deleted.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new token row. A duplicate token value is a database error.
    async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken>;

    /// Find a token row by its value
    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Stamp `revoked_at` on an unrevoked row.
    ///
    /// Returns the number of rows changed: 0 when the token is unknown or
    /// already revoked.
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> AppResult<u64>;
}

/// SeaORM-backed refresh token table
pub struct RefreshTokenTable {
    db: DatabaseConnection,
}

impl RefreshTokenTable {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenRepository for RefreshTokenTable {
    async fn insert(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        let active_model = ActiveModel {
            token: Set(token.token),
            user_id: Set(token.user_id),
            expires_at: Set(token.expires_at),
            revoked_at: Set(token.revoked_at),
            created_at: Set(token.created_at),
            updated_at: Set(token.updated_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(RefreshToken::from(model))
    }

    async fn find(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let result = RefreshTokenEntity::find_by_id(token.to_owned())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RefreshToken::from))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> AppResult<u64> {
        // Conditional on revoked_at IS NULL so the first revocation timestamp wins
        let result = RefreshTokenEntity::update_many()
            .col_expr(refresh_token::Column::RevokedAt, Expr::value(Some(at)))
            .col_expr(refresh_token::Column::UpdatedAt, Expr::value(at))
            .filter(refresh_token::Column::Token.eq(token))
            .filter(refresh_token::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
