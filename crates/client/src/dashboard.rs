//! Terminal dashboard driver.
//!
//! Owns a `ListState` and performs the remote calls its transitions ask
//! for. Removals and reply confirmations only happen after the server
//! answered.

use std::time::Duration;

use feedback_core::dashboard::{ListState, TransitionError, LOAD_FAILED_MESSAGE, REPLY_SETTLE_DELAY};
use feedback_core::notify::ReplyOutcome;

use crate::api::FeedbackApi;

/// Message shown when a delete does not go through.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete message";

pub struct Dashboard<A> {
    api: A,
    state: ListState,
    settle_delay: Duration,
    last_error: Option<String>,
}

impl<A: FeedbackApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ListState::new(),
            settle_delay: REPLY_SETTLE_DELAY,
            last_error: None,
        }
    }

    /// Overrides how long a sent reply's confirmation is kept.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Detail of the most recent failed load, for verbose output.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Loads the list from scratch. Returns the number of dropped records.
    pub async fn load(&mut self) -> usize {
        self.state.begin_load();
        match self.api.list_records().await {
            Ok(records) => {
                self.last_error = None;
                self.state.load_records(records)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                self.state.load_failed(LOAD_FAILED_MESSAGE);
                0
            }
        }
    }

    /// Reloads after a failed load, returning the dropped count of the new
    /// load. `None` if there was nothing to retry.
    pub async fn retry(&mut self) -> Option<usize> {
        if !self.state.retry() {
            return None;
        }
        Some(self.load().await)
    }

    /// Deletes message `id` using the email it was listed with.
    ///
    /// The message leaves the list only once the server confirmed the
    /// delete; otherwise the list stays as it was and shows a notice.
    pub async fn delete(&mut self, id: &str) -> Result<bool, TransitionError> {
        let email = self
            .state
            .view()
            .ok_or(TransitionError::NotLoaded)?
            .entry(id)
            .map(|entry| entry.message.email.clone())
            .ok_or_else(|| TransitionError::UnknownMessage(id.to_string()))?;

        match self.api.delete_message(id, &email).await {
            Ok(()) => {
                self.state.delete_succeeded(id)?;
                Ok(true)
            }
            Err(e) => {
                self.state.delete_failed(format!("{DELETE_FAILED_MESSAGE}: {e}"))?;
                Ok(false)
            }
        }
    }

    pub fn open_reply(&mut self, id: &str) -> Result<(), TransitionError> {
        self.state.open_reply(id)
    }

    pub fn close_reply(&mut self, id: &str) -> Result<(), TransitionError> {
        self.state.close_reply(id)
    }

    pub fn update_draft(&mut self, id: &str, text: impl Into<String>) -> Result<(), TransitionError> {
        self.state.update_draft(id, text)
    }

    /// Submits the reply draft of message `id`.
    ///
    /// Blank drafts fail before the server is called. A successful send
    /// shows its confirmation for the settle delay, then the message is
    /// marked replied.
    pub async fn submit_reply(&mut self, id: &str) -> Result<ReplyOutcome, TransitionError> {
        let request = self.state.submit_reply(id)?;

        let outcome = match self
            .api
            .reply_to_message(&request.email, &request.original, &request.reply_text)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => ReplyOutcome::failed(e.to_string()),
        };

        self.state.reply_finished(id, &outcome)?;

        if outcome.success {
            tokio::time::sleep(self.settle_delay).await;
            self.state.settle_reply(id)?;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use feedback_core::message::ValidationError;

    use super::*;
    use crate::error::{ClientError, Result};

    #[derive(Default)]
    struct FakeApi {
        records: Mutex<Vec<Value>>,
        fail_list: Mutex<bool>,
        fail_delete: Mutex<bool>,
        reply: Mutex<Option<ReplyOutcome>>,
        list_calls: AtomicUsize,
        reply_calls: AtomicUsize,
    }

    impl FakeApi {
        fn with_records(records: Vec<Value>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }
    }

    fn server_error() -> ClientError {
        ClientError::ServerError {
            status: 502,
            message: "Failed to load feedback messages".to_string(),
        }
    }

    #[async_trait]
    impl FeedbackApi for FakeApi {
        async fn list_records(&self) -> Result<Vec<Value>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail_list.lock().unwrap() {
                return Err(server_error());
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn delete_message(&self, id: &str, email: &str) -> Result<()> {
            if *self.fail_delete.lock().unwrap() {
                return Err(server_error());
            }
            self.records
                .lock()
                .unwrap()
                .retain(|r| !(r["id"] == id && r["email"] == email));
            Ok(())
        }

        async fn reply_to_message(
            &self,
            _email: &str,
            _message: &str,
            _reply_text: &str,
        ) -> Result<ReplyOutcome> {
            self.reply_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .reply
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(ReplyOutcome::sent))
        }
    }

    fn records() -> Vec<Value> {
        vec![
            json!({"id": "2", "email": "c@d.com", "message": "yo", "createdAt": 200, "userId": "u2"}),
            json!({"id": "1", "email": "a@b.com", "message": "hi", "createdAt": 100, "userId": "u1"}),
        ]
    }

    fn ids<A: FeedbackApi>(dashboard: &Dashboard<A>) -> Vec<String> {
        dashboard
            .state()
            .view()
            .unwrap()
            .messages()
            .map(|m| m.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_load() {
        let api = Arc::new(FakeApi::with_records(records()));
        let mut dashboard = Dashboard::new(api.clone());

        assert!(dashboard.state().is_loading());
        assert_eq!(dashboard.load().await, 0);
        assert_eq!(ids(&dashboard), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_load_drops_invalid_records() {
        let mut data = records();
        data.push(json!({"id": 3, "email": "x@y.com"}));
        let api = Arc::new(FakeApi::with_records(data));
        let mut dashboard = Dashboard::new(api.clone());

        assert_eq!(dashboard.load().await, 1);
        assert_eq!(ids(&dashboard), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_failed_load_then_retry() {
        let api = Arc::new(FakeApi::with_records(records()));
        *api.fail_list.lock().unwrap() = true;
        let mut dashboard = Dashboard::new(api.clone());

        dashboard.load().await;
        assert_eq!(dashboard.state().error_message(), Some(LOAD_FAILED_MESSAGE));
        assert!(dashboard.last_error().is_some());

        *api.fail_list.lock().unwrap() = false;
        assert_eq!(dashboard.retry().await, Some(0));
        assert_eq!(ids(&dashboard), vec!["2", "1"]);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_without_error_does_nothing() {
        let api = Arc::new(FakeApi::with_records(records()));
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await;

        assert_eq!(dashboard.retry().await, None);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_success_removes_message() {
        let api = Arc::new(FakeApi::with_records(records()));
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await;

        assert_eq!(dashboard.delete("2").await, Ok(true));
        assert_eq!(ids(&dashboard), vec!["1"]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let api = Arc::new(FakeApi::with_records(records()));
        *api.fail_delete.lock().unwrap() = true;
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await;

        assert_eq!(dashboard.delete("2").await, Ok(false));
        assert_eq!(ids(&dashboard), vec!["2", "1"]);
        let notice = dashboard.state().view().unwrap().notice().unwrap();
        assert!(notice.starts_with(DELETE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_blank_reply_never_calls_server() {
        let api = Arc::new(FakeApi::with_records(records()));
        let mut dashboard = Dashboard::new(api.clone());
        dashboard.load().await;

        dashboard.open_reply("1").unwrap();
        dashboard.update_draft("1", " \n ").unwrap();

        assert_eq!(
            dashboard.submit_reply("1").await,
            Err(TransitionError::Validation(ValidationError::EmptyReply))
        );
        assert_eq!(api.reply_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_settles_to_replied() {
        let api = Arc::new(FakeApi::with_records(records()));
        let mut dashboard = Dashboard::new(api.clone()).with_settle_delay(Duration::ZERO);
        dashboard.load().await;

        dashboard.open_reply("1").unwrap();
        dashboard.update_draft("1", "Thanks, fixed!").unwrap();
        let outcome = dashboard.submit_reply("1").await.unwrap();

        assert!(outcome.success);
        let entry = dashboard.state().view().unwrap().entry("1").unwrap();
        assert!(entry.reply.is_replied());
        assert_eq!(
            dashboard.open_reply("1"),
            Err(TransitionError::AlreadyReplied("1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rejected_reply_keeps_draft() {
        let api = Arc::new(FakeApi::with_records(records()));
        *api.reply.lock().unwrap() = Some(ReplyOutcome::failed("Email address is not verified"));
        let mut dashboard = Dashboard::new(api.clone()).with_settle_delay(Duration::ZERO);
        dashboard.load().await;

        dashboard.open_reply("1").unwrap();
        dashboard.update_draft("1", "Thanks").unwrap();
        let outcome = dashboard.submit_reply("1").await.unwrap();

        assert!(!outcome.success);
        let entry = dashboard.state().view().unwrap().entry("1").unwrap();
        assert_eq!(entry.reply.draft(), Some("Thanks"));
        assert_eq!(
            entry.reply.status(),
            Some((false, "Email address is not verified"))
        );
    }
}
