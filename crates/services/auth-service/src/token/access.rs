//! Access token codec - short-lived HS256 JWTs.
//!
//! Validation depends only on the token, the secret and the clock. Nothing is
//! looked up in storage, so an access token stays valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{TokenError, TOKEN_ISSUER};

/// The only signing algorithm accepted on validation.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an access token for `user_id` that expires `ttl` from now.
pub fn issue(user_id: Uuid, secret: &[u8], ttl: Duration) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(&Header::new(ALGORITHM), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AppError::internal(format!("Access token signing failed: {}", e)))
}

/// Validate an access token and return its subject.
///
/// The header algorithm is checked before the signature so a token declaring
/// any other algorithm is refused outright.
pub fn validate(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::WrongAlgorithm);
    }

    let mut validation = Validation::new(ALGORITHM);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    // Expiry is checked below: inclusive, no leeway
    validation.validate_exp = false;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::WrongAlgorithm,
            _ => TokenError::Malformed,
        },
    )?;

    if Utc::now().timestamp() >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
}

/// Access token codec bound to the configured secret and lifetime.
#[derive(Clone)]
pub struct AccessTokens {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for AccessTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokens")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl AccessTokens {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        issue(user_id, &self.secret, self.ttl)
    }

    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        validate(token, &self.secret)
    }
}
