//! Credential extraction from raw request headers.
//!
//! Both schemes share the `Authorization` header. Prefixes are matched
//! case-sensitively, so `bearer abc` is rejected.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use common::{AppError, AppResult};
use domain::{API_KEY_PREFIX, BEARER_TOKEN_PREFIX};

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    extract(headers, BEARER_TOKEN_PREFIX)
}

/// Extract the partner key from `Authorization: ApiKey <key>`.
pub fn api_key(headers: &HeaderMap) -> AppResult<&str> {
    extract(headers, API_KEY_PREFIX)
}

fn extract<'a>(headers: &'a HeaderMap, prefix: &str) -> AppResult<&'a str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingHeader)?
        .to_str()
        .map_err(|_| AppError::MalformedHeader)?;

    if value.is_empty() {
        return Err(AppError::MissingHeader);
    }

    value.strip_prefix(prefix).ok_or(AppError::MalformedHeader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_prefix_is_case_sensitive() {
        let headers = headers_with("bearer abc123");
        assert!(matches!(bearer_token(&headers), Err(AppError::MalformedHeader)));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AppError::MissingHeader)));
        assert!(matches!(api_key(&HeaderMap::new()), Err(AppError::MissingHeader)));
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        let headers = headers_with("");
        assert!(matches!(bearer_token(&headers), Err(AppError::MissingHeader)));
    }

    #[test]
    fn test_api_key() {
        let headers = headers_with("ApiKey secretkey");
        assert_eq!(api_key(&headers).unwrap(), "secretkey");
        assert!(matches!(bearer_token(&headers), Err(AppError::MalformedHeader)));
    }

    #[test]
    fn test_bearer_header_is_not_an_api_key() {
        let headers = headers_with("Bearer abc123");
        assert!(matches!(api_key(&headers), Err(AppError::MalformedHeader)));
    }

    #[test]
    fn test_non_utf8_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert!(matches!(bearer_token(&headers), Err(AppError::MalformedHeader)));
    }
}
