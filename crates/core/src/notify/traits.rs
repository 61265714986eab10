use async_trait::async_trait;

use super::{NotificationError, ReplyOutcome};

/// Sends reply emails to feedback senders.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `reply_text` to `recipient`, quoting `original`.
    ///
    /// Makes at most one delivery attempt. Expected delivery failures come
    /// back as `Ok` with `success: false`.
    async fn send_reply(
        &self,
        recipient: &str,
        original: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome, NotificationError>;
}
