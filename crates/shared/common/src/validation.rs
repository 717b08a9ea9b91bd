//! Request payload validation.

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` rules on a decoded payload.
///
/// Only the first failing field's message is reported.
pub fn validate_input<T: Validate>(value: &T) -> AppResult<()> {
    value.validate().map_err(|e| {
        let message = e
            .field_errors()
            .values()
            .next()
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());
        AppError::validation(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::NewCredentials;

    #[test]
    fn test_reports_field_message() {
        let input = NewCredentials {
            email: "walt@breakingbad.com".to_string(),
            password: "short".to_string(),
        };

        match validate_input(&input) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Password must be at least 8 characters")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let input = NewCredentials {
            email: "walt@breakingbad.com".to_string(),
            password: "04234567".to_string(),
        };
        assert!(validate_input(&input).is_ok());
    }
}
