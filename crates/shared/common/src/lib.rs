//! Common utilities shared across the credential services.
//!
//! This crate provides:
//! - Unified error handling with HTTP status mapping
//! - Configuration structures
//! - Input validation helpers

pub mod config;
pub mod error;
pub mod validation;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use validation::validate_input;
