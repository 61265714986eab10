//! The seam between the dashboard driver and the server.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use feedback_core::notify::ReplyOutcome;

use crate::client::FeedbackClient;
use crate::error::Result;

/// Operations the dashboard needs from the server.
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    /// Raw message records, validated by the dashboard before display.
    async fn list_records(&self) -> Result<Vec<Value>>;

    async fn delete_message(&self, id: &str, email: &str) -> Result<()>;

    async fn reply_to_message(
        &self,
        email: &str,
        message: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome>;
}

#[async_trait]
impl FeedbackApi for FeedbackClient {
    async fn list_records(&self) -> Result<Vec<Value>> {
        FeedbackClient::list_records(self).await
    }

    async fn delete_message(&self, id: &str, email: &str) -> Result<()> {
        FeedbackClient::delete_message(self, id, email).await
    }

    async fn reply_to_message(
        &self,
        email: &str,
        message: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome> {
        FeedbackClient::reply_to_message(self, email, message, reply_text).await
    }
}

#[async_trait]
impl<T: FeedbackApi + ?Sized> FeedbackApi for Arc<T> {
    async fn list_records(&self) -> Result<Vec<Value>> {
        (**self).list_records().await
    }

    async fn delete_message(&self, id: &str, email: &str) -> Result<()> {
        (**self).delete_message(id, email).await
    }

    async fn reply_to_message(
        &self,
        email: &str,
        message: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome> {
        (**self).reply_to_message(email, message, reply_text).await
    }
}
