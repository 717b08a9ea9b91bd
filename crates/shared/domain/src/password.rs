//! Password value object - one-way salted password hashing.
//!
//! Hashes are argon2id PHC strings, so the algorithm parameters and the salt
//! travel with the stored value and old hashes keep verifying after a
//! parameter change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Hashed password as stored on the user record.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls with the same input return different hashes. Both verify.
    ///
    /// # Errors
    /// Returns `DomainError::Hashing` if argon2 cannot produce a hash.
    pub fn hash(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    ///
    /// A well-formed hash that does not match yields `Ok(false)`. The digest
    /// comparison inside argon2 is constant-time.
    ///
    /// # Errors
    /// Returns `DomainError::Hashing` if the stored hash is not a valid PHC string.
    pub fn verify(&self, plain_text: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(&self.hash)
            .map_err(|e| DomainError::hashing(format!("Invalid hash format: {}", e)))?;

        match Self::argon2().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::hashing(format!("Password verify failed: {}", e))),
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::hash(plain).unwrap();

        assert!(password.verify(plain).unwrap());
        assert!(!password.verify("WrongPassword123").unwrap());
    }

    #[test]
    fn test_hash_is_self_describing() {
        let password = Password::hash("04234567").unwrap();
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::hash(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::hash(plain).unwrap();
        let pass2 = Password::hash(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        // But both verify correctly
        assert!(pass1.verify(plain).unwrap());
        assert!(pass2.verify(plain).unwrap());
    }

    #[test]
    fn test_empty_password_round_trips() {
        let password = Password::hash("").unwrap();
        assert!(password.verify("").unwrap());
        assert!(!password.verify(" ").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let corrupt = Password::from_hash("not-a-phc-string");
        let err = corrupt.verify("anything").unwrap_err();
        assert!(matches!(err, DomainError::Hashing(_)));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::hash("SecurePassword123!").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
