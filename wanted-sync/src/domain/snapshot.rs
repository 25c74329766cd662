//! Store Snapshot
//!
//! What `GET {base}` on the local store returns: one JSON array holding the
//! records plus the sync marker `{"id": "check", "lastUpdated": ...}`.
//! Anything else is rejected.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use super::sync_state::{parse_stored_date, SYNC_MARKER_ID};
use super::wanted::WantedRecord;

/// Payload is not a record collection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("expected an array of records, got {found}")]
    NotACollection { found: &'static str },
    #[error("invalid lastUpdated value '{0}'")]
    InvalidDate(String),
    #[error("record #{index} is malformed: {message}")]
    Record { index: usize, message: String },
}

/// Decoded local store state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub last_updated: Option<NaiveDate>,
    pub persons: Vec<WantedRecord>,
    /// Whether the sync marker record exists
    pub has_marker: bool,
}

impl StoreSnapshot {
    pub fn decode(payload: Value) -> Result<Self, ShapeError> {
        let entries = match payload {
            Value::Array(entries) => entries,
            other => {
                return Err(ShapeError::NotACollection {
                    found: kind_of(&other),
                })
            }
        };

        let mut snapshot = StoreSnapshot::default();
        for (index, entry) in entries.into_iter().enumerate() {
            if is_marker(&entry) {
                snapshot.has_marker = true;
                snapshot.last_updated = read_date(entry.get("lastUpdated"))?;
                continue;
            }
            snapshot.persons.push(decode_record(index, entry)?);
        }

        Ok(snapshot)
    }
}

/// Whether `id` names the sync marker rather than a record
pub fn is_marker_id(id: &str) -> bool {
    id == SYNC_MARKER_ID
}

fn is_marker(entry: &Value) -> bool {
    entry.get("id").and_then(Value::as_str).is_some_and(is_marker_id)
}

fn read_date(raw: Option<&Value>) -> Result<Option<NaiveDate>, ShapeError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_stored_date(s)
            .map(Some)
            .ok_or_else(|| ShapeError::InvalidDate(s.clone())),
        Some(other) => Err(ShapeError::InvalidDate(other.to_string())),
    }
}

fn decode_record(index: usize, entry: Value) -> Result<WantedRecord, ShapeError> {
    serde_json::from_value(entry).map_err(|e| ShapeError::Record {
        index,
        message: e.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_collection() {
        let snapshot = StoreSnapshot::decode(json!([])).unwrap();
        assert!(snapshot.persons.is_empty());
        assert_eq!(snapshot.last_updated, None);
        assert!(!snapshot.has_marker);
    }

    #[test]
    fn test_collection_marker_is_not_a_record() {
        let payload = json!([
            {"id": 1, "title": "A"},
            {"id": "check", "lastUpdated": "2024-01-01"},
            {"id": 2, "title": "B"}
        ]);
        let snapshot = StoreSnapshot::decode(payload).unwrap();

        assert_eq!(snapshot.persons.len(), 2);
        assert!(snapshot.has_marker);
        assert_eq!(snapshot.last_updated, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_object_payload_is_rejected() {
        let err = StoreSnapshot::decode(json!({"lastUpdated": null, "persons": []})).unwrap_err();
        assert_eq!(err, ShapeError::NotACollection { found: "object" });

        let err = StoreSnapshot::decode(json!(null)).unwrap_err();
        assert_eq!(err, ShapeError::NotACollection { found: "null" });
    }

    #[test]
    fn test_bad_date() {
        let err = StoreSnapshot::decode(json!([{"id": "check", "lastUpdated": "yesterday"}]))
            .unwrap_err();
        assert_eq!(err, ShapeError::InvalidDate("yesterday".to_string()));
    }

    #[test]
    fn test_malformed_record() {
        let err = StoreSnapshot::decode(json!([{"id": 1, "title": "A"}, {"id": 2, "title": 7}]))
            .unwrap_err();
        assert!(matches!(err, ShapeError::Record { index: 1, .. }));
    }

    #[test]
    fn test_marker_id() {
        assert!(is_marker_id("check"));
        assert!(!is_marker_id("Check"));
        assert!(!is_marker_id("12"));
    }
}
