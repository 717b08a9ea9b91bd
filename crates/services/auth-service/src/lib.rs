//! Auth Service Library
//!
//! Credential handling for the chirpy backend: password hashing, access and
//! refresh tokens, and the session flows built on them. Routing and request
//! decoding belong to the transport layer, which hands over parsed bodies and
//! raw headers.

pub mod commands;
pub mod config;
pub mod headers;
pub mod infra;
pub mod repository;
pub mod service;
pub mod token;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AuthServiceConfig;
use crate::repository::{RefreshTokenTable, UserStore};
use crate::service::Sessions;
use crate::token::{AccessTokens, RefreshTokens};

/// Wire the session service to a database connection.
pub fn build_sessions(db: DatabaseConnection, config: &AuthServiceConfig) -> Sessions {
    Sessions::new(
        Arc::new(UserStore::new(db.clone())),
        AccessTokens::new(config.jwt_secret_bytes(), config.access_ttl()),
        build_refresh_tokens(db),
        config.refresh_ttl(),
        config.partner_api_key().to_string(),
    )
}

/// Refresh token store backed by the `refresh_tokens` table.
pub fn build_refresh_tokens(db: DatabaseConnection) -> RefreshTokens {
    RefreshTokens::new(Arc::new(RefreshTokenTable::new(db)))
}
