//! DynamoDB repository implementation.
//!
//! Implements `MessageRepository` from `feedback_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use feedback_core::message::{sort_newest_first, FeedbackMessage, MessageKey};
use feedback_core::storage::{MessageRepository, Result};

use super::conversions::item_to_message;
use super::error::{map_delete_item_error, map_scan_error};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Scans the whole table, following pagination until exhausted.
    ///
    /// With `id`, only items whose `id` equals it are returned.
    async fn scan_all(&self, id: Option<&str>) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take());

            if let Some(id) = id {
                request = request
                    .filter_expression("#id = :id")
                    .expression_attribute_names("#id", "id")
                    .expression_attribute_values(":id", AttributeValue::S(id.to_string()));
            }

            let output = request
                .send()
                .await
                .map_err(|e| map_scan_error(e, &self.table_name))?;

            pages += 1;
            items.extend(output.items.unwrap_or_default());

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(
            table = %self.table_name,
            pages,
            count = items.len(),
            "Scanned feedback table"
        );

        Ok(items)
    }

    fn decode_items(items: &[Item]) -> Vec<FeedbackMessage> {
        items
            .iter()
            .filter_map(|item| match item_to_message(item) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping feedback item with unsupported shape");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl MessageRepository for DynamoDbRepository {
    async fn list(&self) -> Result<Vec<FeedbackMessage>> {
        let items = self.scan_all(None).await?;
        let mut messages = Self::decode_items(&items);
        sort_newest_first(&mut messages);
        Ok(messages)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<FeedbackMessage>> {
        let items = self.scan_all(Some(id)).await?;
        Ok(Self::decode_items(&items)
            .into_iter()
            .find(|message| message.id == id))
    }

    async fn delete(&self, key: &MessageKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(key.id().to_string()))
            .key("email", AttributeValue::S(key.email().to_string()))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name, key))?;

        tracing::debug!(table = %self.table_name, key = %key, "Deleted feedback item");
        Ok(())
    }
}
