use thiserror::Error;

use crate::message::ValidationError;

/// A transition that is not allowed from the current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("No messages are loaded")]
    NotLoaded,
    #[error("Unknown message: {0}")]
    UnknownMessage(String),
    #[error("A reply was already sent for message {0}")]
    AlreadyReplied(String),
    #[error("Message {0} has no reply in progress")]
    NoReplyInProgress(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
