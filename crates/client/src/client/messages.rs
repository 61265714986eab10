//! Feedback message operations.

use serde::Serialize;
use serde_json::Value;

use feedback_core::message::FeedbackMessage;
use feedback_core::notify::ReplyOutcome;

use super::FeedbackClient;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    id: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    email: &'a str,
    message: &'a str,
    reply_text: &'a str,
}

impl FeedbackClient {
    /// List all messages, newest first.
    pub async fn list_messages(&self) -> Result<Vec<FeedbackMessage>> {
        let response = self.get("/actions/messages").send().await?;
        self.handle_response(response, "messages").await
    }

    /// List all messages as untyped JSON records.
    pub async fn list_records(&self) -> Result<Vec<Value>> {
        let response = self.get("/actions/messages").send().await?;
        self.handle_response(response, "messages").await
    }

    /// Get a message by ID.
    pub async fn get_message(&self, id: &str) -> Result<FeedbackMessage> {
        let response = self.get(&format!("/actions/messages/{id}")).send().await?;
        self.handle_response(response, &format!("message {id}"))
            .await
    }

    /// Delete the message addressed by `(id, email)`.
    pub async fn delete_message(&self, id: &str, email: &str) -> Result<()> {
        let response = self
            .post("/actions/messages/delete")
            .json(&DeleteRequest { id, email })
            .send()
            .await?;
        self.handle_empty_response(response, &format!("message {id}"))
            .await
    }

    /// Send a reply to `email`, quoting `message`.
    pub async fn reply_to_message(
        &self,
        email: &str,
        message: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome> {
        let response = self
            .post("/actions/messages/reply")
            .json(&ReplyRequest {
                email,
                message,
                reply_text,
            })
            .send()
            .await?;
        self.handle_response(response, "reply").await
    }
}
