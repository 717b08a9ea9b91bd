//! Session business logic.

pub mod hashing;
mod session;

pub use session::{AccessTokenResponse, LoginResponse, SessionService, Sessions};
