//! In-memory repository implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use feedback_core::message::{
    detect_shape, from_json_record, sort_newest_first, FeedbackMessage, MessageKey,
};
use feedback_core::storage::{MessageRepository, Result, StorageError};

/// Errors that can occur while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Seed file must contain a JSON array of records")]
    NotAnArray,
}

/// In-memory storage backend.
///
/// Uses a `Vec` of raw records wrapped in `Arc<RwLock<_>>` for thread-safe
/// access. Data is not persisted and will be lost when the repository is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<Vec<Value>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given raw records, in store order.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Loads records from a JSON file containing an array of records.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> std::result::Result<Self, SeedError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let Value::Array(records) = serde_json::from_str::<Value>(&contents)? else {
            return Err(SeedError::NotAnArray);
        };

        tracing::info!(
            path = %path.as_ref().display(),
            count = records.len(),
            shape = %detect_shape(&records),
            "Loaded feedback seed file"
        );

        Ok(Self::with_records(records))
    }

    /// Normalizes every stored record, skipping ones of unknown shape.
    fn normalize_all(records: &[Value]) -> Vec<FeedbackMessage> {
        tracing::debug!(
            count = records.len(),
            shape = %detect_shape(records),
            "Normalizing stored feedback records"
        );

        records
            .iter()
            .filter_map(|record| match from_json_record(record) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping feedback record with unsupported shape");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl MessageRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<FeedbackMessage>> {
        let records = self.records.read().await;
        let mut messages = Self::normalize_all(&records);
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<FeedbackMessage>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter_map(|record| from_json_record(record).ok())
            .find(|message| message.id == id))
    }

    async fn delete(&self, key: &MessageKey) -> Result<()> {
        let mut records = self.records.write().await;

        let position = records.iter().position(|record| {
            from_json_record(record)
                .map(|message| key.matches(&message))
                .unwrap_or(false)
        });

        match position {
            Some(index) => {
                records.remove(index);
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("feedback message {key}"))),
        }
    }
}
