//! Auth service configuration loaded from environment variables.

use std::env;

use chrono::Duration;

use common::{AppError, AppResult, DatabaseConfig, TokenConfig};
use domain::MIN_JWT_SECRET_LENGTH;

/// Auth service configuration.
#[derive(Clone, Default)]
pub struct AuthServiceConfig {
    pub database: DatabaseConfig,
    pub tokens: TokenConfig,
    /// Shared key presented by the payment partner's webhook
    partner_api_key: String,
}

impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("database", &self.database)
            .field("tokens", &self.tokens)
            .field("partner_api_key", &"[REDACTED]")
            .finish()
    }
}

impl AuthServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if `JWT_SECRET` or `PARTNER_API_KEY` is
    /// missing, the secret is too short, or a TTL is not a positive integer.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| AppError::validation("JWT_SECRET must be set"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let partner_api_key = lookup("PARTNER_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::validation("PARTNER_API_KEY must be set"))?;

        let defaults = TokenConfig::default();
        let tokens = TokenConfig {
            jwt_secret,
            access_ttl_seconds: positive(&lookup, "ACCESS_TOKEN_TTL_SECONDS")?
                .unwrap_or(defaults.access_ttl_seconds),
            refresh_ttl_days: positive(&lookup, "REFRESH_TOKEN_TTL_DAYS")?
                .unwrap_or(defaults.refresh_ttl_days),
        };

        let mut database = DatabaseConfig::default();
        if let Some(url) = lookup("DATABASE_URL") {
            database.url = url;
        }

        Ok(Self {
            database,
            tokens,
            partner_api_key,
        })
    }

    /// Get JWT secret as bytes.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.tokens.jwt_secret.as_bytes()
    }

    pub fn partner_api_key(&self) -> &str {
        &self.partner_api_key
    }

    /// Access token lifetime
    pub fn access_ttl(&self) -> Duration {
        Duration::seconds(self.tokens.access_ttl_seconds)
    }

    /// Refresh token lifetime
    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.tokens.refresh_ttl_days)
    }
}

/// Parse an optional positive integer variable.
fn positive<F>(lookup: &F, key: &str) -> AppResult<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Some(value)),
            _ => Err(AppError::validation(format!(
                "{} must be a positive integer",
                key
            ))),
        },
    }
}
