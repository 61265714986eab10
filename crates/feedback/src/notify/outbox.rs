//! In-memory reply notifier.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use feedback_core::notify::{NotificationError, Notifier, ReplyEmail, ReplyOutcome};

use super::compose_reply;

/// Notifier that keeps composed emails instead of delivering them.
///
/// Every reply is accepted. Useful for local development, where the
/// composed email is logged so it can be inspected.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    identity: String,
    outbox: Arc<RwLock<Vec<ReplyEmail>>>,
}

impl OutboxNotifier {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            outbox: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Emails composed so far, oldest first.
    #[cfg(test)]
    pub async fn sent(&self) -> Vec<ReplyEmail> {
        self.outbox.read().await.clone()
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn send_reply(
        &self,
        recipient: &str,
        original: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome, NotificationError> {
        let email = compose_reply(&self.identity, recipient, original, reply_text)?;

        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            "Reply stored in outbox"
        );
        tracing::debug!(body = %email.text, "Outbox reply body");

        self.outbox.write().await.push(email);
        Ok(ReplyOutcome::sent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_is_recorded() {
        let notifier = OutboxNotifier::new("qpply.me");

        let outcome = notifier
            .send_reply("a@b.com", "hi", "Thanks for writing")
            .await
            .unwrap();

        assert_eq!(outcome, ReplyOutcome::sent());

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].from, "support@qpply.me");
    }
}
