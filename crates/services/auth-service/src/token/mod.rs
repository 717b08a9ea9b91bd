//! Access and refresh token handling.

pub mod access;
pub mod refresh;

pub use access::{AccessTokens, Claims};
pub use refresh::RefreshTokens;
