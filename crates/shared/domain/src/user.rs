//! User domain entity and credential request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, non-premium user
    pub fn new(id: Uuid, email: String, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            hashed_password,
            is_premium: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the login email and password hash
    pub fn update_credentials(&mut self, email: String, hashed_password: String) {
        self.email = email;
        self.hashed_password = hashed_password;
        self.updated_at = Utc::now();
    }

    /// Grant the premium tier
    pub fn upgrade(&mut self) {
        self.is_premium = true;
        self.updated_at = Utc::now();
    }
}

/// Login request (email + plaintext password)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Credentials for a new account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCredentials {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Replacement credentials for an authenticated user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCredentials {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address
    pub email: String,
    /// Premium tier flag
    pub is_premium: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_not_premium() {
        let user = User::new(Uuid::new_v4(), "a@example.com".into(), "hash".into());
        assert!(!user.is_premium);
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User::new(Uuid::new_v4(), "a@example.com".into(), "secret-hash".into());
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("secret-hash"));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
    }

    #[test]
    fn test_credentials_validation() {
        let ok = NewCredentials {
            email: "walt@breakingbad.com".into(),
            password: "04234567".into(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = NewCredentials {
            email: "not-an-email".into(),
            password: "04234567".into(),
        };
        assert!(bad_email.validate().is_err());

        let short = UpdateCredentials {
            email: "walt@breakingbad.com".into(),
            password: "short".into(),
        };
        assert!(short.validate().is_err());
    }
}
