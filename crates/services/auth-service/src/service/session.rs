//! Session orchestration - login, refresh, revoke and credential updates.
//!
//! Holds no per-session state of its own. Everything that outlives a request
//! lives in the refresh token table.

use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::hashing::{hash_password, verify_dummy, verify_password, warm_dummy};
use crate::headers::{api_key, bearer_token};
use crate::repository::UserRepository;
use crate::token::{AccessTokens, RefreshTokens};
use common::{validate_input, AppError, AppResult};
use domain::{
    LoginRequest, NewCredentials, Password, UpdateCredentials, User, UserResponse,
    TOKEN_TYPE_BEARER,
};

/// Access token returned by refresh
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Tokens and profile returned after a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Session service trait for dependency injection.
///
/// Token rejection reasons never leave this trait: every token failure is
/// reported as `AppError::Unauthorized`.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create an account with a hashed password
    async fn register(&self, input: NewCredentials) -> AppResult<User>;

    /// Check email and password, then issue an access and a refresh token
    async fn login(&self, input: LoginRequest) -> AppResult<LoginResponse>;

    /// Exchange the bearer refresh token for a new access token
    async fn refresh(&self, headers: &HeaderMap) -> AppResult<AccessTokenResponse>;

    /// Revoke the bearer refresh token
    async fn revoke(&self, headers: &HeaderMap) -> AppResult<()>;

    /// Replace email and password of the bearer access token's user
    async fn update_credentials(
        &self,
        headers: &HeaderMap,
        input: UpdateCredentials,
    ) -> AppResult<User>;

    /// Resolve the caller's user id from a bearer access token
    fn authenticate(&self, headers: &HeaderMap) -> AppResult<Uuid>;

    /// Partner webhook: grant premium to `user_id` after an API key check
    async fn upgrade_premium(&self, headers: &HeaderMap, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of SessionService.
pub struct Sessions {
    users: Arc<dyn UserRepository>,
    access_tokens: AccessTokens,
    refresh_tokens: RefreshTokens,
    refresh_ttl: Duration,
    partner_api_key: String,
}

impl Sessions {
    /// Create a session service from its collaborators
    pub fn new(
        users: Arc<dyn UserRepository>,
        access_tokens: AccessTokens,
        refresh_tokens: RefreshTokens,
        refresh_ttl: Duration,
        partner_api_key: String,
    ) -> Self {
        warm_dummy();
        Self {
            users,
            access_tokens,
            refresh_tokens,
            refresh_ttl,
            partner_api_key,
        }
    }

    fn access_token_response(&self, user_id: Uuid) -> AppResult<AccessTokenResponse> {
        Ok(AccessTokenResponse {
            access_token: self.access_tokens.issue(user_id)?,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.access_tokens.ttl().num_seconds(),
        })
    }

    /// Reject `email` if it belongs to someone other than `owner`
    async fn ensure_email_available(&self, email: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("User")),
            _ => Ok(()),
        }
    }
}

/// Collapse internal token rejection reasons to `Unauthorized`.
fn unauthorized(err: AppError) -> AppError {
    match err {
        AppError::Token(reason) => {
            debug!(%reason, "Token rejected");
            AppError::Unauthorized
        }
        other => other,
    }
}

#[async_trait]
impl SessionService for Sessions {
    async fn register(&self, input: NewCredentials) -> AppResult<User> {
        validate_input(&input)?;
        self.ensure_email_available(&input.email, None).await?;

        let hashed = hash_password(input.password).await?;
        let user = self.users.create(input.email, hashed.into_string()).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, input: LoginRequest) -> AppResult<LoginResponse> {
        let Some(user) = self.users.find_by_email(&input.email).await? else {
            verify_dummy(input.password).await;
            debug!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let stored = Password::from_hash(user.hashed_password.clone());
        if !verify_password(stored, input.password).await? {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let access = self.access_token_response(user.id)?;
        let refresh = self.refresh_tokens.issue(user.id, self.refresh_ttl).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse {
            user: UserResponse::from(user),
            access_token: access.access_token,
            refresh_token: refresh.token,
            token_type: access.token_type,
            expires_in: access.expires_in,
        })
    }

    async fn refresh(&self, headers: &HeaderMap) -> AppResult<AccessTokenResponse> {
        let token = bearer_token(headers)?;
        let user_id = self
            .refresh_tokens
            .resolve_user(token)
            .await
            .map_err(unauthorized)?;

        debug!(%user_id, "Access token refreshed");
        self.access_token_response(user_id)
    }

    async fn revoke(&self, headers: &HeaderMap) -> AppResult<()> {
        let token = bearer_token(headers)?;
        self.refresh_tokens.revoke(token).await.map_err(unauthorized)
    }

    async fn update_credentials(
        &self,
        headers: &HeaderMap,
        input: UpdateCredentials,
    ) -> AppResult<User> {
        let user_id = self.authenticate(headers)?;
        validate_input(&input)?;
        self.ensure_email_available(&input.email, Some(user_id)).await?;

        let hashed = hash_password(input.password).await?;
        let user = self
            .users
            .update_credentials(user_id, input.email, hashed.into_string())
            .await?;

        info!(%user_id, "User credentials updated");
        Ok(user)
    }

    fn authenticate(&self, headers: &HeaderMap) -> AppResult<Uuid> {
        let token = bearer_token(headers)?;
        self.access_tokens
            .validate(token)
            .map_err(|reason| unauthorized(reason.into()))
    }

    async fn upgrade_premium(&self, headers: &HeaderMap, user_id: Uuid) -> AppResult<()> {
        let provided = api_key(headers)?;
        let matches: bool = provided
            .as_bytes()
            .ct_eq(self.partner_api_key.as_bytes())
            .into();
        if !matches {
            warn!("Partner webhook rejected: API key mismatch");
            return Err(AppError::Unauthorized);
        }

        self.users.set_premium(user_id, true).await?;
        info!(%user_id, "User upgraded to premium");
        Ok(())
    }
}
