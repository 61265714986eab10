//! Feedback service: the orchestration layer behind every handler.
//!
//! Validates inputs before any remote call, delegates to the injected
//! repository and notifier, and keeps the list cache coherent with writes.

use std::sync::Arc;

use feedback_core::error::FeedbackError;
use feedback_core::message::{FeedbackMessage, MessageKey, ValidationError};
use feedback_core::notify::{Notifier, ReplyOutcome};
use feedback_core::storage::MessageRepository;

use crate::cache::ListCache;

const LIST_ACTION: &str = "load feedback messages";
const GET_ACTION: &str = "load feedback message";
const DELETE_ACTION: &str = "delete feedback message";

/// Feedback operations shared by the HTML and JSON handlers.
#[derive(Clone)]
pub struct FeedbackService {
    repository: Arc<dyn MessageRepository>,
    notifier: Arc<dyn Notifier>,
    cache: ListCache,
}

impl FeedbackService {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        notifier: Arc<dyn Notifier>,
        cache: ListCache,
    ) -> Self {
        Self {
            repository,
            notifier,
            cache,
        }
    }

    /// All messages, newest first.
    pub async fn list_messages(&self) -> Result<Vec<FeedbackMessage>, FeedbackError> {
        if let Some(messages) = self.cache.get().await {
            return Ok(messages);
        }

        let generation = self.cache.generation();
        let messages = self.repository.list().await.map_err(|e| {
            tracing::error!(error = %e, "Error fetching feedback messages");
            FeedbackError::storage(LIST_ACTION, e)
        })?;

        self.cache.store(generation, &messages).await;
        tracing::debug!(count = messages.len(), "Listed feedback messages");
        Ok(messages)
    }

    pub async fn get_message(&self, id: &str) -> Result<Option<FeedbackMessage>, FeedbackError> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingId.into());
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| FeedbackError::storage(GET_ACTION, e))
    }

    /// Deletes the message addressed by `(id, email)`.
    ///
    /// Both parts are required; nothing is sent to storage otherwise.
    pub async fn delete_message(&self, id: &str, email: &str) -> Result<(), FeedbackError> {
        let key = MessageKey::new(id, email)?;

        self.repository.delete(&key).await.map_err(|e| {
            tracing::error!(error = %e, key = %key, "Error deleting feedback message");
            FeedbackError::storage(DELETE_ACTION, e)
        })?;

        self.cache.invalidate().await;
        tracing::info!(key = %key, "Deleted feedback message");
        Ok(())
    }

    /// Sends `reply_text` to `email`, quoting `original`.
    ///
    /// Expected delivery failures come back as an unsuccessful outcome.
    pub async fn reply_to_message(
        &self,
        email: &str,
        original: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome, FeedbackError> {
        if email.trim().is_empty() {
            return Err(ValidationError::MissingRecipient.into());
        }
        if reply_text.trim().is_empty() {
            return Err(ValidationError::EmptyReply.into());
        }

        let outcome = self
            .notifier
            .send_reply(email, original, reply_text)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, to = %email, "Error sending reply");
                FeedbackError::from(e)
            })?;

        if outcome.success {
            self.cache.invalidate().await;
        } else {
            tracing::warn!(to = %email, reason = %outcome.message, "Reply was not delivered");
        }

        Ok(outcome)
    }
}
