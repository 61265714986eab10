//! Normalization of stored records into [`FeedbackMessage`].
//!
//! The store may hand back records in two shapes:
//!
//! - **Tagged**: every scalar wrapped with its type, `{"id": {"S": "1"}, "createdAt": {"N": "100"}}`
//! - **Flat**: plain JSON scalars, `{"id": "1", "createdAt": 100}`
//!
//! Each value is decoded through [`WireValue`], an explicit tagged union of
//! the accepted shapes. Anything else rejects the record. Missing fields
//! normalize to `""` or `0`.

use serde::Deserialize;
use serde_json::Value;

use super::{DecodeError, FeedbackMessage};

/// Field names of a stored feedback record.
pub const FIELD_ID: &str = "id";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_USER_ID: &str = "userId";

pub const FIELDS: [&str; 5] = [
    FIELD_ID,
    FIELD_EMAIL,
    FIELD_MESSAGE,
    FIELD_CREATED_AT,
    FIELD_USER_ID,
];

/// A type-tagged scalar, as returned by the native store API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum TaggedScalar {
    /// String value.
    S(String),
    /// Number value, transported as a decimal string.
    N(String),
}

/// A single field value in either accepted wire shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Tagged(TaggedScalar),
    Text(String),
    Number(serde_json::Number),
}

impl WireValue {
    /// Decodes a JSON value. `null` counts as a missing field.
    pub fn from_json(field: &'static str, value: &Value) -> Result<Option<Self>, DecodeError> {
        if value.is_null() {
            return Ok(None);
        }

        Self::deserialize(value)
            .map(Some)
            .map_err(|_| DecodeError::UnsupportedShape {
                field,
                found: value.to_string(),
            })
    }

    fn into_text(self, field: &'static str) -> Result<String, DecodeError> {
        match self {
            WireValue::Tagged(TaggedScalar::S(s)) | WireValue::Text(s) => Ok(s),
            WireValue::Tagged(TaggedScalar::N(n)) => Err(DecodeError::UnsupportedShape {
                field,
                found: format!("{{\"N\":\"{n}\"}}"),
            }),
            WireValue::Number(n) => Err(DecodeError::UnsupportedShape {
                field,
                found: n.to_string(),
            }),
        }
    }

    fn into_millis(self, field: &'static str) -> Result<i64, DecodeError> {
        match self {
            WireValue::Tagged(TaggedScalar::N(n)) => parse_number(field, &n),
            WireValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .ok_or_else(|| DecodeError::InvalidNumber {
                    field,
                    value: n.to_string(),
                }),
            WireValue::Tagged(TaggedScalar::S(s)) | WireValue::Text(s) => {
                Err(DecodeError::UnsupportedShape { field, found: s })
            }
        }
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64, DecodeError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f as i64)
        })
        .ok_or_else(|| DecodeError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Builds a canonical message from a field lookup.
///
/// `field` returns the decoded value of a named field, `None` when absent.
/// Backends supply their own lookup so the same rules apply to every store.
pub fn normalize<F>(mut field: F) -> Result<FeedbackMessage, DecodeError>
where
    F: FnMut(&'static str) -> Result<Option<WireValue>, DecodeError>,
{
    let mut text = |name: &'static str| -> Result<String, DecodeError> {
        match field(name)? {
            Some(value) => value.into_text(name),
            None => Ok(String::new()),
        }
    };

    let id = text(FIELD_ID)?;
    let email = text(FIELD_EMAIL)?;
    let message = text(FIELD_MESSAGE)?;
    let user_id = text(FIELD_USER_ID)?;

    let created_at = match field(FIELD_CREATED_AT)? {
        Some(value) => value.into_millis(FIELD_CREATED_AT)?,
        None => 0,
    };

    Ok(FeedbackMessage {
        id,
        email,
        message,
        created_at,
        user_id,
    })
}

/// Normalizes a JSON record in either wire shape.
pub fn from_json_record(record: &Value) -> Result<FeedbackMessage, DecodeError> {
    let map = record.as_object().ok_or(DecodeError::NotAnObject)?;

    normalize(|name| match map.get(name) {
        Some(value) => WireValue::from_json(name, value),
        None => Ok(None),
    })
}

/// Detected wire shape of a whole store response. Used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Tagged,
    Flat,
    Mixed,
    Empty,
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseShape::Tagged => "tagged",
            ResponseShape::Flat => "flat",
            ResponseShape::Mixed => "mixed",
            ResponseShape::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Inspects the known fields of every record to classify a response.
pub fn detect_shape(records: &[Value]) -> ResponseShape {
    let mut tagged = false;
    let mut flat = false;

    let values = records
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|map| FIELDS.iter().filter_map(move |name| map.get(*name)));

    for value in values {
        match value {
            Value::Object(_) => tagged = true,
            Value::String(_) | Value::Number(_) => flat = true,
            _ => {}
        }
    }

    match (tagged, flat) {
        (true, true) => ResponseShape::Mixed,
        (true, false) => ResponseShape::Tagged,
        (false, true) => ResponseShape::Flat,
        (false, false) => ResponseShape::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical() -> FeedbackMessage {
        FeedbackMessage::new("1", "a@b.com", "hi", 100, "u1")
    }

    #[test]
    fn test_tagged_and_flat_normalize_identically() {
        let tagged = json!({
            "id": {"S": "1"},
            "email": {"S": "a@b.com"},
            "message": {"S": "hi"},
            "createdAt": {"N": "100"},
            "userId": {"S": "u1"}
        });
        let flat = json!({
            "id": "1",
            "email": "a@b.com",
            "message": "hi",
            "createdAt": 100,
            "userId": "u1"
        });

        assert_eq!(from_json_record(&tagged).unwrap(), canonical());
        assert_eq!(from_json_record(&flat).unwrap(), canonical());
    }

    #[test]
    fn test_missing_fields_normalize_to_defaults() {
        let record = json!({"id": {"S": "1"}, "email": "a@b.com"});
        let message = from_json_record(&record).unwrap();

        assert_eq!(message.message, "");
        assert_eq!(message.user_id, "");
        assert_eq!(message.created_at, 0);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let record = json!({"id": "1", "email": "a@b.com", "message": null});
        assert_eq!(from_json_record(&record).unwrap().message, "");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let record = json!({"id": {"BOOL": true}, "email": "a@b.com"});
        let error = from_json_record(&record).unwrap_err();

        assert!(matches!(
            error,
            DecodeError::UnsupportedShape { field: "id", .. }
        ));
    }

    #[test]
    fn test_list_value_is_rejected() {
        let record = json!({"id": "1", "email": ["a@b.com"]});
        assert!(from_json_record(&record).is_err());
    }

    #[test]
    fn test_number_where_text_expected_is_rejected() {
        let record = json!({"id": 7, "email": "a@b.com"});
        assert!(matches!(
            from_json_record(&record),
            Err(DecodeError::UnsupportedShape { field: "id", .. })
        ));
    }

    #[test]
    fn test_invalid_tagged_number_is_rejected() {
        let record = json!({"id": "1", "createdAt": {"N": "soon"}});
        assert!(matches!(
            from_json_record(&record),
            Err(DecodeError::InvalidNumber { field: "createdAt", .. })
        ));
    }

    #[test]
    fn test_fractional_number_truncates() {
        let record = json!({"id": "1", "createdAt": {"N": "1700000000000.0"}});
        assert_eq!(from_json_record(&record).unwrap().created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        assert_eq!(from_json_record(&json!("1")), Err(DecodeError::NotAnObject));
    }

    #[test]
    fn test_detect_shape() {
        let tagged = json!({"id": {"S": "1"}});
        let flat = json!({"id": "1"});

        assert_eq!(detect_shape(&[tagged.clone()]), ResponseShape::Tagged);
        assert_eq!(detect_shape(&[flat.clone()]), ResponseShape::Flat);
        assert_eq!(detect_shape(&[tagged, flat]), ResponseShape::Mixed);
        assert_eq!(detect_shape(&[]), ResponseShape::Empty);
    }
}
