//! Shared response shapes for confirmation messages and errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Confirmation message returned by mutations that do not echo an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body: a map of field name (or the literal key "Error") to a
/// human-readable message.
///
/// Validation failures key their entries by the offending field; every
/// other failure uses the single "Error" key. A `BTreeMap` keeps the
/// serialized key order stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody(pub BTreeMap<String, String>);

impl ErrorBody {
    /// Body with the single "Error" entry.
    pub fn error(message: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert("Error".to_string(), message.into());
        Self(map)
    }

    /// Body keyed by a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), message.into());
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_serializes_as_flat_map() {
        let body = ErrorBody::error("Post with the title 'x' not found!");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"Error": "Post with the title 'x' not found!"})
        );
    }

    #[test]
    fn field_body_keys_by_field() {
        let body = ErrorBody::field("title", "Title should not be blank");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"title": "Title should not be blank"}));
    }
}
