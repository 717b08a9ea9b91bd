//! Password hashing on the blocking thread pool.
//!
//! Argon2 is deliberately slow and memory hungry, so it never runs on an
//! async worker thread.

use once_cell::sync::Lazy;

use common::{AppError, AppResult};
use domain::Password;

/// Real argon2 hash used when the login email matches no account.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash("dummy-password-never-matches").ok());

/// Hash `plain_text` off the async runtime.
pub async fn hash_password(plain_text: String) -> AppResult<Password> {
    let result = tokio::task::spawn_blocking(move || Password::hash(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?;

    Ok(result?)
}

/// Verify `plain_text` against `stored` off the async runtime.
pub async fn verify_password(stored: Password, plain_text: String) -> AppResult<bool> {
    let result = tokio::task::spawn_blocking(move || stored.verify(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?;

    Ok(result?)
}

/// Compute the dummy hash now rather than on the first unknown-email login.
pub fn warm_dummy() {
    Lazy::force(&DUMMY_PASSWORD);
}

/// Spend the same argon2 cost as a real login, then discard the result.
///
/// Keeps the unknown-email path as slow as the wrong-password path. Without
/// a dummy hash the plaintext is hashed instead, which costs the same.
pub async fn verify_dummy(plain_text: String) {
    // Outcome is meaningless here; only the elapsed work matters
    let _ = tokio::task::spawn_blocking(move || match DUMMY_PASSWORD.as_ref() {
        Some(dummy) => dummy.verify(&plain_text).map(|_| ()),
        None => Password::hash(&plain_text).map(|_| ()),
    })
    .await;
}
