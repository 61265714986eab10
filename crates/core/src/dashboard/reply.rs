use crate::message::ValidationError;
use crate::notify::ReplyOutcome;

use super::TransitionError;

/// Per-message reply form state.
///
/// `Hidden -> Editing -> Submitting -> Sent -> Replied`, with a failed send
/// returning to `Editing` carrying the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Hidden,
    Editing {
        draft: String,
        /// Failure message of the previous attempt, if any.
        status: Option<String>,
    },
    Submitting {
        draft: String,
    },
    /// Delivery accepted; the confirmation is shown until the reply settles.
    Sent {
        message: String,
    },
    Replied,
}

/// What a shell needs to hand to the notifier after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub id: String,
    pub email: String,
    pub original: String,
    pub reply_text: String,
}

impl ReplyState {
    pub fn is_form_visible(&self) -> bool {
        matches!(
            self,
            ReplyState::Editing { .. } | ReplyState::Submitting { .. } | ReplyState::Sent { .. }
        )
    }

    pub fn is_replied(&self) -> bool {
        matches!(self, ReplyState::Replied)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ReplyState::Submitting { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            ReplyState::Editing { draft, .. } | ReplyState::Submitting { draft } => Some(draft),
            _ => None,
        }
    }

    /// Status line to show under the form: `(success, message)`.
    pub fn status(&self) -> Option<(bool, &str)> {
        match self {
            ReplyState::Editing {
                status: Some(message),
                ..
            } => Some((false, message)),
            ReplyState::Sent { message } => Some((true, message)),
            _ => None,
        }
    }

    pub(super) fn open(&mut self, id: &str) -> Result<(), TransitionError> {
        match self {
            ReplyState::Replied => Err(TransitionError::AlreadyReplied(id.to_string())),
            ReplyState::Hidden => {
                *self = ReplyState::Editing {
                    draft: String::new(),
                    status: None,
                };
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub(super) fn close(&mut self) {
        match self {
            ReplyState::Editing { .. } => *self = ReplyState::Hidden,
            // Closing the confirmation early still counts as replied.
            ReplyState::Sent { .. } => *self = ReplyState::Replied,
            // A send in flight cannot be cancelled.
            ReplyState::Submitting { .. } | ReplyState::Hidden | ReplyState::Replied => {}
        }
    }

    pub(super) fn update_draft(&mut self, id: &str, text: String) -> Result<(), TransitionError> {
        match self {
            ReplyState::Editing { draft, .. } => {
                *draft = text;
                Ok(())
            }
            _ => Err(TransitionError::NoReplyInProgress(id.to_string())),
        }
    }

    /// Moves `Editing -> Submitting` and returns the text to send.
    ///
    /// Blank drafts are rejected and leave the state untouched.
    pub(super) fn submit(&mut self, id: &str) -> Result<String, TransitionError> {
        let ReplyState::Editing { draft, .. } = self else {
            return Err(TransitionError::NoReplyInProgress(id.to_string()));
        };

        if draft.trim().is_empty() {
            return Err(ValidationError::EmptyReply.into());
        }

        let draft = std::mem::take(draft);
        *self = ReplyState::Submitting {
            draft: draft.clone(),
        };
        Ok(draft)
    }

    pub(super) fn finish(&mut self, id: &str, outcome: &ReplyOutcome) -> Result<(), TransitionError> {
        let ReplyState::Submitting { draft } = self else {
            return Err(TransitionError::NoReplyInProgress(id.to_string()));
        };

        let next = if outcome.success {
            ReplyState::Sent {
                message: outcome.message.clone(),
            }
        } else {
            ReplyState::Editing {
                draft: std::mem::take(draft),
                status: Some(outcome.message.clone()),
            }
        };
        *self = next;
        Ok(())
    }

    pub(super) fn settle(&mut self, id: &str) -> Result<(), TransitionError> {
        match self {
            ReplyState::Sent { .. } => {
                *self = ReplyState::Replied;
                Ok(())
            }
            ReplyState::Replied => Ok(()),
            _ => Err(TransitionError::NoReplyInProgress(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(draft: &str) -> ReplyState {
        ReplyState::Editing {
            draft: draft.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_open_from_hidden() {
        let mut state = ReplyState::Hidden;
        state.open("1").unwrap();
        assert_eq!(state, editing(""));
        assert!(state.is_form_visible());
    }

    #[test]
    fn test_open_after_replied_is_rejected() {
        let mut state = ReplyState::Replied;
        assert_eq!(
            state.open("1"),
            Err(TransitionError::AlreadyReplied("1".to_string()))
        );
    }

    #[test]
    fn test_submit_blank_is_rejected_without_state_change() {
        let mut state = editing("   \n");
        assert_eq!(
            state.submit("1"),
            Err(TransitionError::Validation(ValidationError::EmptyReply))
        );
        assert_eq!(state, editing("   \n"));
    }

    #[test]
    fn test_failed_send_keeps_draft() {
        let mut state = editing("Thanks!");
        assert_eq!(state.submit("1").unwrap(), "Thanks!");
        assert!(state.is_submitting());

        state
            .finish("1", &ReplyOutcome::failed("Sending paused"))
            .unwrap();

        assert_eq!(state.draft(), Some("Thanks!"));
        assert_eq!(state.status(), Some((false, "Sending paused")));
    }

    #[test]
    fn test_successful_send_settles_to_replied() {
        let mut state = editing("Thanks!");
        state.submit("1").unwrap();
        state.finish("1", &ReplyOutcome::sent()).unwrap();

        assert_eq!(state.status(), Some((true, "Reply sent successfully")));

        state.settle("1").unwrap();
        assert!(state.is_replied());
        assert!(!state.is_form_visible());
    }

    #[test]
    fn test_close_while_submitting_is_ignored() {
        let mut state = ReplyState::Submitting {
            draft: "x".to_string(),
        };
        state.close();
        assert!(state.is_submitting());
    }

    #[test]
    fn test_close_during_confirmation_marks_replied() {
        let mut state = ReplyState::Sent {
            message: "ok".to_string(),
        };
        state.close();
        assert!(state.is_replied());
    }
}
