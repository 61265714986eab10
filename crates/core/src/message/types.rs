use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A feedback message left by a customer.
///
/// Records are created by an external producer and are immutable here: the
/// only lifecycle event this system performs is deletion by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMessage {
    pub id: String,
    /// Sender address, the sort key of the composite `(id, email)` key.
    pub email: String,
    pub message: String,
    /// Epoch milliseconds. Only used for ordering.
    pub created_at: i64,
    pub user_id: String,
}

impl FeedbackMessage {
    /// Creates a new message. Used by seeders and tests.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        created_at: i64,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            message: message.into(),
            created_at,
            user_id: user_id.into(),
        }
    }

    /// Returns the composite key addressing this record.
    pub fn key(&self) -> Result<MessageKey, ValidationError> {
        MessageKey::new(&self.id, &self.email)
    }
}

/// The validated `(id, email)` composite key of a stored message.
///
/// Both parts are guaranteed non-blank, so holding a `MessageKey` proves
/// validation already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    id: String,
    email: String,
}

impl MessageKey {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let email = email.into();

        if id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        Ok(Self { id, email })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns true if `message` is the record addressed by this key.
    pub fn matches(&self, message: &FeedbackMessage) -> bool {
        message.id == self.id && message.email == self.email
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.id, self.email)
    }
}
