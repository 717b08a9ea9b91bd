//! SeaORM entity definitions.
//!
//! These are database-specific entities separate from domain models.

pub mod refresh_token;
pub mod user;
