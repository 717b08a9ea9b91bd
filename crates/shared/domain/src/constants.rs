//! Domain-level constants.
//!
//! These constants define credential lifetimes and wire-level prefixes.

// =============================================================================
// Access Tokens
// =============================================================================

/// Issuer claim stamped on every access token
pub const TOKEN_ISSUER: &str = "chirpy";

/// Default access token lifetime in seconds (1 hour)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Refresh Tokens
// =============================================================================

/// Default refresh token lifetime in days
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Random bytes per refresh token (hex encoded to twice as many chars)
pub const REFRESH_TOKEN_BYTES: usize = 32;

// =============================================================================
// Authorization Header
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Authorization header prefix for the partner API key
pub const API_KEY_PREFIX: &str = "ApiKey ";
