use thiserror::Error;

/// Unexpected failures while sending a reply.
///
/// Expected delivery failures are reported through
/// [`ReplyOutcome`](super::ReplyOutcome) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Failed to compose reply email: {0}")]
    Compose(String),
    #[error("Failed to reach the email service: {0}")]
    Transport(String),
}
