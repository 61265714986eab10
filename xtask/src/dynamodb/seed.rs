//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use feedback_core::message::FeedbackMessage;
use std::collections::HashMap;
use uuid::Uuid;

/// BatchWriteItem accepts at most 25 requests.
const BATCH_SIZE: usize = 25;

const SENDERS: [&str; 6] = [
    "ana@example.com",
    "bruno@example.com",
    "carla@example.org",
    "dmitri@example.net",
    "eve@example.com",
    "farah@example.org",
];

const MESSAGES: [&str; 8] = [
    "The export button does nothing on Safari.",
    "Could you add a dark mode to the mobile app?",
    "I was charged twice for my subscription this month.",
    "Love the new onboarding flow, great work!",
    "Password reset email never arrives.",
    "Is there an API for bulk uploads?",
    "The app crashes when I rotate my tablet.",
    "Please support <b>rich text</b> & emoji in notes.",
];

/// Generates `count` messages spaced one hour apart, ending at `now_ms`.
pub fn generate_seed_messages(count: u32, now_ms: i64) -> Vec<FeedbackMessage> {
    const HOUR_MS: i64 = 60 * 60 * 1000;

    (0..count as usize)
        .map(|i| {
            FeedbackMessage::new(
                Uuid::new_v4().to_string(),
                SENDERS[i % SENDERS.len()],
                MESSAGES[i % MESSAGES.len()],
                now_ms - i as i64 * HOUR_MS,
                Uuid::new_v4().simple().to_string(),
            )
        })
        .collect()
}

/// Convert a message to a DynamoDB item.
fn message_to_item(message: &FeedbackMessage) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(message.id.clone())),
        ("email".to_string(), AttributeValue::S(message.email.clone())),
        (
            "message".to_string(),
            AttributeValue::S(message.message.clone()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::N(message.created_at.to_string()),
        ),
        (
            "userId".to_string(),
            AttributeValue::S(message.user_id.clone()),
        ),
    ])
}

/// Insert messages into DynamoDB.
pub async fn seed_messages(
    client: &Client,
    table_name: &str,
    messages: &[FeedbackMessage],
) -> Result<u32> {
    let mut inserted = 0;

    for chunk in messages.chunks(BATCH_SIZE) {
        let write_requests = chunk
            .iter()
            .map(|message| {
                let put = PutRequest::builder()
                    .set_item(Some(message_to_item(message)))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}

/// Short preview of a message body for display.
pub fn preview(message: &FeedbackMessage) -> String {
    const MAX_CHARS: usize = 40;

    if message.message.chars().count() > MAX_CHARS {
        let truncated: String = message.message.chars().take(MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        message.message.clone()
    }
}
