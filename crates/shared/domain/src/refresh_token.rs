//! Refresh token entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;

/// Lifecycle state of a refresh token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Active,
    Expired,
    Revoked,
}

/// Long-lived opaque token persisted per login.
///
/// Records are never deleted. Revocation stamps `revoked_at` and expiry is
/// implicit in `expires_at`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshToken")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .field("revoked_at", &self.revoked_at)
            .finish()
    }
}

impl RefreshToken {
    /// Create an unrevoked token for `user_id` expiring at `expires_at`
    pub fn new(token: String, user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            expires_at,
            revoked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Status at `now`. Expiry is checked before revocation.
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        if now >= self.expires_at {
            TokenStatus::Expired
        } else if self.revoked_at.is_some() {
            TokenStatus::Revoked
        } else {
            TokenStatus::Active
        }
    }

    /// Owning user id if the token is active at `now`
    pub fn owner_at(&self, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        match self.status_at(now) {
            TokenStatus::Active => Ok(self.user_id),
            TokenStatus::Expired => Err(TokenError::Expired),
            TokenStatus::Revoked => Err(TokenError::Revoked),
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Stamp revocation. A second call keeps the first timestamp.
    pub fn revoke(&mut self, at: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(at);
            self.updated_at = at;
        }
    }
}
