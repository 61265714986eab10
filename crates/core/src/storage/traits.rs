use async_trait::async_trait;

use crate::message::{FeedbackMessage, MessageKey};

use super::Result;

/// Repository for feedback message operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Lists every stored message, newest first.
    async fn list(&self) -> Result<Vec<FeedbackMessage>>;

    /// Finds a message by its ID alone. Performs a filtered scan.
    async fn get_by_id(&self, id: &str) -> Result<Option<FeedbackMessage>>;

    /// Deletes the message addressed by the composite key.
    ///
    /// Fails with `StorageError::NotFound` when no such record exists.
    async fn delete(&self, key: &MessageKey) -> Result<()>;
}
