use thiserror::Error;

/// Errors raised by input validation, always before any remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message ID is required")]
    MissingId,
    #[error("Sender email is required")]
    MissingEmail,
    #[error("Recipient email is required")]
    MissingRecipient,
    #[error("Reply text cannot be empty")]
    EmptyReply,
}

/// Errors that can occur when normalizing a stored record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Record is not an object")]
    NotAnObject,
    #[error("Field '{field}' has an unsupported value shape: {found}")]
    UnsupportedShape { field: &'static str, found: String },
    #[error("Field '{field}' is not a valid number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyReply.to_string(),
            "Reply text cannot be empty"
        );
        assert_eq!(
            ValidationError::MissingEmail.to_string(),
            "Sender email is required"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let error = DecodeError::UnsupportedShape {
            field: "id",
            found: "{\"BOOL\":true}".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Field 'id' has an unsupported value shape: {\"BOOL\":true}"
        );
    }
}
