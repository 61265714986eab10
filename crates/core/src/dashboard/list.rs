use std::collections::HashSet;

use serde_json::Value;

use crate::message::{FeedbackMessage, ValidationError};
use crate::notify::ReplyOutcome;

use super::{ReplyRequest, ReplyState, TransitionError};

/// Message shown when the list cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load feedback messages";

/// A displayed message and its reply form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub message: FeedbackMessage,
    pub reply: ReplyState,
}

/// Messages currently on display, in list order, with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedView {
    entries: Vec<MessageEntry>,
    notice: Option<String>,
}

impl LoadedView {
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &FeedbackMessage> {
        self.entries.iter().map(|entry| &entry.message)
    }

    pub fn entry(&self, id: &str) -> Option<&MessageEntry> {
        self.entries.iter().find(|entry| entry.message.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inline error notice from a failed delete.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// Top-level dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Loading,
    Loaded(LoadedView),
    Error {
        message: String,
    },
}

impl ListState {
    pub fn new() -> Self {
        Self::Loading
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn view(&self) -> Option<&LoadedView> {
        match self {
            ListState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ListState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Starts a fresh load from any state.
    pub fn begin_load(&mut self) {
        *self = ListState::Loading;
    }

    /// Resolves the load with raw records, validating each one.
    ///
    /// Returns the number of records that were dropped.
    pub fn load_records(&mut self, records: Vec<Value>) -> usize {
        let total = records.len();
        let messages = validate_records(records);
        let dropped = total - messages.len();
        self.load_messages(messages);
        dropped
    }

    /// Resolves the load with already typed messages.
    pub fn load_messages(&mut self, messages: Vec<FeedbackMessage>) {
        let mut seen = HashSet::new();
        let entries = messages
            .into_iter()
            .filter(|message| accept(message, &mut seen))
            .map(|message| MessageEntry {
                message,
                reply: ReplyState::Hidden,
            })
            .collect();

        *self = ListState::Loaded(LoadedView {
            entries,
            notice: None,
        });
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        *self = ListState::Error {
            message: message.into(),
        };
    }

    /// `Error -> Loading`. Returns false from any other state.
    pub fn retry(&mut self) -> bool {
        if matches!(self, ListState::Error { .. }) {
            *self = ListState::Loading;
            true
        } else {
            false
        }
    }

    /// Removes a message after its delete was confirmed.
    pub fn delete_succeeded(&mut self, id: &str) -> Result<(), TransitionError> {
        let view = self.view_mut()?;
        view.entries.retain(|entry| entry.message.id != id);
        view.notice = None;
        Ok(())
    }

    /// Keeps the list unchanged and shows `message` inline.
    pub fn delete_failed(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.view_mut()?.notice = Some(message.into());
        Ok(())
    }

    pub fn open_reply(&mut self, id: &str) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply.open(id)
    }

    pub fn close_reply(&mut self, id: &str) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply.close();
        Ok(())
    }

    pub fn update_draft(&mut self, id: &str, text: impl Into<String>) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply.update_draft(id, text.into())
    }

    /// Submits the reply draft of message `id`.
    ///
    /// Fails with `ValidationError::EmptyReply` for a blank draft, in which
    /// case the notifier must not be called.
    pub fn submit_reply(&mut self, id: &str) -> Result<ReplyRequest, TransitionError> {
        let entry = self.entry_mut(id)?;
        let reply_text = entry.reply.submit(id)?;

        Ok(ReplyRequest {
            id: id.to_string(),
            email: entry.message.email.clone(),
            original: entry.message.message.clone(),
            reply_text,
        })
    }

    pub fn reply_finished(&mut self, id: &str, outcome: &ReplyOutcome) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply.finish(id, outcome)
    }

    /// Records an unexpected send failure as a failed outcome.
    pub fn reply_failed(&mut self, id: &str, message: impl Into<String>) -> Result<(), TransitionError> {
        self.reply_finished(id, &ReplyOutcome::failed(message))
    }

    /// `Sent -> Replied` once the confirmation delay elapsed.
    pub fn settle_reply(&mut self, id: &str) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply.settle(id)
    }

    /// Shows message `id` as replied without going through the form again.
    ///
    /// Used after a reload when the reply was confirmed by an earlier view.
    pub fn mark_replied(&mut self, id: &str) -> Result<(), TransitionError> {
        self.entry_mut(id)?.reply = ReplyState::Replied;
        Ok(())
    }

    fn view_mut(&mut self) -> Result<&mut LoadedView, TransitionError> {
        match self {
            ListState::Loaded(view) => Ok(view),
            _ => Err(TransitionError::NotLoaded),
        }
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut MessageEntry, TransitionError> {
        self.view_mut()?
            .entries
            .iter_mut()
            .find(|entry| entry.message.id == id)
            .ok_or_else(|| TransitionError::UnknownMessage(id.to_string()))
    }
}

/// Validates raw records against the canonical message shape.
///
/// Records with the wrong JSON types, a blank id or email, or a repeated id
/// are dropped and logged.
pub fn validate_records(records: Vec<Value>) -> Vec<FeedbackMessage> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<FeedbackMessage>(record.clone()) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::warn!(error = %e, record = %record, "Invalid feedback item format");
                None
            }
        })
        .filter(|message| accept(message, &mut seen))
        .collect()
}

fn accept(message: &FeedbackMessage, seen: &mut HashSet<String>) -> bool {
    if let Err(e) = message.key() {
        let reason = match e {
            ValidationError::MissingId => "missing id",
            _ => "missing email",
        };
        tracing::warn!(id = %message.id, reason, "Dropping feedback item");
        return false;
    }

    if !seen.insert(message.id.clone()) {
        tracing::warn!(id = %message.id, "Dropping duplicate feedback item");
        return false;
    }

    true
}
