//! Refresh token store - long-lived opaque tokens with persisted state.
//!
//! This is the only token check that reads storage, which makes refresh
//! tokens the point of revocation. Tokens are not rotated on use.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::RefreshTokenRepository;
use common::AppResult;
use domain::{RefreshToken, TokenError, REFRESH_TOKEN_BYTES};

/// Issues, resolves and revokes refresh tokens.
#[derive(Clone)]
pub struct RefreshTokens {
    repo: Arc<dyn RefreshTokenRepository>,
}

impl RefreshTokens {
    pub fn new(repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { repo }
    }

    /// Generate and persist a token for `user_id` expiring `ttl` from now.
    pub async fn issue(&self, user_id: Uuid, ttl: Duration) -> AppResult<RefreshToken> {
        let token = RefreshToken::new(generate_token_value(), user_id, Utc::now() + ttl);
        let stored = self.repo.insert(token).await?;

        debug!(%user_id, expires_at = %stored.expires_at, "Issued refresh token");
        Ok(stored)
    }

    /// Return the owner of an active token.
    ///
    /// # Errors
    /// `TokenError::NotFound`, `TokenError::Expired` or `TokenError::Revoked`
    /// wrapped in `AppError::Token`, or a database error.
    pub async fn resolve_user(&self, token: &str) -> AppResult<Uuid> {
        let record = self.repo.find(token).await?.ok_or(TokenError::NotFound)?;
        Ok(record.owner_at(Utc::now())?)
    }

    /// Revoke a token. Revoking an already revoked token succeeds.
    ///
    /// # Errors
    /// `TokenError::NotFound` when no such token exists.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        if self.repo.revoke(token, Utc::now()).await? > 0 {
            info!("Refresh token revoked");
            return Ok(());
        }

        // No row changed: already revoked, or unknown
        match self.repo.find(token).await? {
            Some(_) => {
                debug!("Refresh token was already revoked");
                Ok(())
            }
            None => Err(TokenError::NotFound.into()),
        }
    }
}

/// 256 bits from the OS RNG, hex encoded.
fn generate_token_value() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRefreshTokenRepository;
    use common::AppError;

    fn stored(token: &str, ttl: Duration) -> RefreshToken {
        RefreshToken::new(token.to_string(), Uuid::new_v4(), Utc::now() + ttl)
    }

    #[test]
    fn test_token_value_shape() {
        let a = generate_token_value();
        let b = generate_token_value();

        assert_eq!(a.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_issue_persists_new_token() {
        let user_id = Uuid::new_v4();

        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_insert()
            .withf(move |t| t.user_id == user_id && t.revoked_at.is_none())
            .times(1)
            .returning(Ok);

        let store = RefreshTokens::new(Arc::new(repo));
        let token = store.issue(user_id, Duration::days(60)).await.unwrap();

        assert_eq!(token.user_id, user_id);
        assert!(token.expires_at > Utc::now() + Duration::days(59));
    }

    #[tokio::test]
    async fn test_resolve_active_token() {
        let record = stored("abc", Duration::days(1));
        let owner = record.user_id;

        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_find()
            .withf(|token| token == "abc")
            .returning(move |_| Ok(Some(record.clone())));

        let store = RefreshTokens::new(Arc::new(repo));
        assert_eq!(store.resolve_user("abc").await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_find().returning(|_| Ok(None));

        let store = RefreshTokens::new(Arc::new(repo));
        let err = store.resolve_user("nope").await.unwrap_err();
        assert!(matches!(err, AppError::Token(TokenError::NotFound)));
    }

    #[tokio::test]
    async fn test_resolve_expired_token() {
        let record = stored("old", Duration::seconds(-1));

        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_find()
            .returning(move |_| Ok(Some(record.clone())));

        let store = RefreshTokens::new(Arc::new(repo));
        let err = store.resolve_user("old").await.unwrap_err();
        assert!(matches!(err, AppError::Token(TokenError::Expired)));
    }

    #[tokio::test]
    async fn test_resolve_revoked_token() {
        let mut record = stored("gone", Duration::days(1));
        record.revoke(Utc::now());

        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_find()
            .returning(move |_| Ok(Some(record.clone())));

        let store = RefreshTokens::new(Arc::new(repo));
        let err = store.resolve_user("gone").await.unwrap_err();
        assert!(matches!(err, AppError::Token(TokenError::Revoked)));
    }

    #[tokio::test]
    async fn test_revoke_updates_once() {
        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_revoke().times(1).returning(|_, _| Ok(1));
        repo.expect_find().never();

        let store = RefreshTokens::new(Arc::new(repo));
        assert!(store.revoke("abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_already_revoked_is_ok() {
        let mut record = stored("abc", Duration::days(1));
        record.revoke(Utc::now());

        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_revoke().returning(|_, _| Ok(0));
        repo.expect_find()
            .returning(move |_| Ok(Some(record.clone())));

        let store = RefreshTokens::new(Arc::new(repo));
        assert!(store.revoke("abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let mut repo = MockRefreshTokenRepository::new();
        repo.expect_revoke().returning(|_, _| Ok(0));
        repo.expect_find().returning(|_| Ok(None));

        let store = RefreshTokens::new(Arc::new(repo));
        let err = store.revoke("nope").await.unwrap_err();
        assert!(matches!(err, AppError::Token(TokenError::NotFound)));
    }
}
