use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// Every remote failure is classified into one of these variants so callers
/// can tell a missing record from a credentials problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Key does not match the table schema: {0}")]
    MalformedKey(String),
    #[error("Access denied, check the storage credentials: {0}")]
    AccessDenied(String),
    #[error("Storage request failed: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Classifies a remote error by its service error code.
///
/// Used for failures that the SDK does not model as a typed variant, such as
/// authorization errors which surface as unhandled errors carrying a code.
pub fn classify_error_code(code: Option<&str>, detail: impl Into<String>) -> StorageError {
    let detail = detail.into();
    match code {
        Some("ResourceNotFoundException") => StorageError::NotFound(detail),
        Some("ValidationException") => StorageError::MalformedKey(detail),
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException"
            | "MissingAuthenticationTokenException"
            | "InvalidClientTokenId",
        ) => StorageError::AccessDenied(detail),
        _ => StorageError::Other(detail),
    }
}
