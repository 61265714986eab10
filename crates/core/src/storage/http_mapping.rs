//! Pure functions for mapping storage errors to HTTP status codes.

use super::StorageError;

/// Maps a [`StorageError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `MalformedKey` -> 400 (Bad Request)
/// - `AccessDenied` -> 503 (Service Unavailable)
/// - `Other` -> 502 (Bad Gateway)
///
/// # Examples
///
/// ```
/// use feedback_core::storage::{storage_error_to_status_code, StorageError};
///
/// let error = StorageError::NotFound("message 1".to_string());
/// assert_eq!(storage_error_to_status_code(&error), 404);
/// ```
pub fn storage_error_to_status_code(error: &StorageError) -> u16 {
    match error {
        StorageError::NotFound(_) => 404,
        StorageError::MalformedKey(_) => 400,
        StorageError::AccessDenied(_) => 503,
        StorageError::Other(_) => 502,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = StorageError::NotFound("1/a@b.com".to_string());
        assert_eq!(storage_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_malformed_key_maps_to_400() {
        let error = StorageError::MalformedKey("missing sort key".to_string());
        assert_eq!(storage_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_access_denied_maps_to_503() {
        let error = StorageError::AccessDenied("expired".to_string());
        assert_eq!(storage_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_other_maps_to_502() {
        let error = StorageError::Other("timeout".to_string());
        assert_eq!(storage_error_to_status_code(&error), 502);
    }
}
