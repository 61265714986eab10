use serde::{Deserialize, Serialize};

/// Message reported when a reply was accepted for delivery.
pub const REPLY_SENT_MESSAGE: &str = "Reply sent successfully";

/// Result of a reply attempt. Callers branch on `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOutcome {
    pub success: bool,
    pub message: String,
}

impl ReplyOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: REPLY_SENT_MESSAGE.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A composed reply email, ready to hand to a delivery backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}
