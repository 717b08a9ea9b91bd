//! Repository layer for credential persistence.

pub mod entities;
mod refresh_token_repository;
mod user_repository;

pub use refresh_token_repository::{RefreshTokenRepository, RefreshTokenTable};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use refresh_token_repository::MockRefreshTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
