//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting DynamoDB AttributeValue maps into
//! [`FeedbackMessage`]. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use feedback_core::message::{normalize, DecodeError, FeedbackMessage, TaggedScalar, WireValue};

/// Converts a single attribute into the tagged wire shape.
///
/// Only string and number attributes are accepted. `NULL` counts as missing.
pub fn attribute_to_wire(
    field: &'static str,
    value: &AttributeValue,
) -> Result<Option<WireValue>, DecodeError> {
    match value {
        AttributeValue::S(s) => Ok(Some(WireValue::Tagged(TaggedScalar::S(s.clone())))),
        AttributeValue::N(n) => Ok(Some(WireValue::Tagged(TaggedScalar::N(n.clone())))),
        AttributeValue::Null(_) => Ok(None),
        other => Err(DecodeError::UnsupportedShape {
            field,
            found: format!("{other:?}"),
        }),
    }
}

/// Convert a DynamoDB item to FeedbackMessage.
pub fn item_to_message(
    item: &HashMap<String, AttributeValue>,
) -> Result<FeedbackMessage, DecodeError> {
    normalize(|name| match item.get(name) {
        Some(value) => attribute_to_wire(name, value),
        None => Ok(None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_item_to_message() {
        let item = item(&[
            ("id", AttributeValue::S("1".to_string())),
            ("email", AttributeValue::S("a@b.com".to_string())),
            ("message", AttributeValue::S("hi".to_string())),
            ("createdAt", AttributeValue::N("100".to_string())),
            ("userId", AttributeValue::S("u1".to_string())),
        ]);

        assert_eq!(
            item_to_message(&item).unwrap(),
            FeedbackMessage::new("1", "a@b.com", "hi", 100, "u1")
        );
    }

    #[test]
    fn test_missing_attributes_default() {
        let item = item(&[
            ("id", AttributeValue::S("1".to_string())),
            ("email", AttributeValue::S("a@b.com".to_string())),
            ("userId", AttributeValue::Null(true)),
        ]);

        let message = item_to_message(&item).unwrap();
        assert_eq!(message.message, "");
        assert_eq!(message.user_id, "");
        assert_eq!(message.created_at, 0);
    }

    #[test]
    fn test_unsupported_attribute_rejects_item() {
        let item = item(&[
            ("id", AttributeValue::S("1".to_string())),
            ("email", AttributeValue::Bool(true)),
        ]);

        assert!(matches!(
            item_to_message(&item),
            Err(DecodeError::UnsupportedShape { field: "email", .. })
        ));
    }

    #[test]
    fn test_string_timestamp_rejects_item() {
        let item = item(&[
            ("id", AttributeValue::S("1".to_string())),
            ("createdAt", AttributeValue::S("yesterday".to_string())),
        ]);

        assert!(item_to_message(&item).is_err());
    }
}
