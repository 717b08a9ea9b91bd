//! Domain layer - Core credential entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod password;
pub mod refresh_token;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, TokenError};
pub use password::Password;
pub use refresh_token::{RefreshToken, TokenStatus};
pub use user::{LoginRequest, NewCredentials, UpdateCredentials, User, UserResponse};
