//! Errors at the orchestration boundary.

use thiserror::Error;

use crate::message::ValidationError;
use crate::notify::NotificationError;
use crate::storage::{storage_error_to_status_code, StorageError};

/// Message shown when a delete is attempted without its composite key.
pub const DELETE_KEY_REQUIRED_MESSAGE: &str = "Both ID and email are required to delete a message";

/// Error returned by feedback service operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to {action}: {source}")]
    Storage {
        action: &'static str,
        source: StorageError,
    },
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl FeedbackError {
    /// Wraps a storage error with the action that was being performed.
    pub fn storage(action: &'static str, source: StorageError) -> Self {
        Self::Storage { action, source }
    }

    /// Message suitable for showing to an operator.
    pub fn user_message(&self) -> String {
        match self {
            FeedbackError::Validation(ValidationError::MissingId | ValidationError::MissingEmail) => {
                DELETE_KEY_REQUIRED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Maps a [`FeedbackError`] to an HTTP status code.
///
/// Validation failures are the caller's fault (400); storage errors follow
/// [`storage_error_to_status_code`]; notification failures are upstream
/// failures (502).
pub fn feedback_error_to_status_code(error: &FeedbackError) -> u16 {
    match error {
        FeedbackError::Validation(_) => 400,
        FeedbackError::Storage { source, .. } => storage_error_to_status_code(source),
        FeedbackError::Notification(_) => 502,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_includes_action() {
        let error = FeedbackError::storage(
            "delete feedback message",
            StorageError::NotFound("1/a@b.com".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "Failed to delete feedback message: Not found: 1/a@b.com"
        );
    }

    #[test]
    fn test_missing_key_user_message() {
        let error = FeedbackError::from(ValidationError::MissingEmail);
        assert_eq!(error.user_message(), DELETE_KEY_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_empty_reply_user_message() {
        let error = FeedbackError::from(ValidationError::EmptyReply);
        assert_eq!(error.user_message(), "Reply text cannot be empty");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            feedback_error_to_status_code(&ValidationError::MissingId.into()),
            400
        );
        assert_eq!(
            feedback_error_to_status_code(&FeedbackError::storage(
                "list feedback messages",
                StorageError::Other("timeout".to_string())
            )),
            502
        );
        assert_eq!(
            feedback_error_to_status_code(&NotificationError::Transport("dns".to_string()).into()),
            502
        );
    }
}
