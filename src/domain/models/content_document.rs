use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{format_timestamp, Fields, CREATED_AT, UPDATED_AT};

/// A document exactly as the store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    id: String,
    fields: Fields,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

/// A singleton content document with its system timestamps lifted out.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    id: String,
    fields: Fields,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ContentDocument {
    pub fn from_stored(stored: StoredDocument) -> Self {
        let created_at = stored.fields.timestamp(CREATED_AT);
        let updated_at = stored.fields.timestamp(UPDATED_AT);
        Self {
            id: stored.id,
            fields: stored.fields.without_system_fields(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Flat JSON object with `id`, the content fields and ISO-8601 timestamps.
    pub fn to_canonical_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.extend(self.fields.to_canonical_json());
        if let Some(ts) = &self.created_at {
            object.insert(CREATED_AT.to_string(), Value::String(format_timestamp(ts)));
        }
        if let Some(ts) = &self.updated_at {
            object.insert(UPDATED_AT.to_string(), Value::String(format_timestamp(ts)));
        }
        Value::Object(object)
    }
}

impl From<StoredDocument> for ContentDocument {
    fn from(stored: StoredDocument) -> Self {
        Self::from_stored(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_timestamps_are_lifted_out_of_fields() {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap();
        let stored = StoredDocument::new(
            "mainContact",
            Fields::new().with("email", "a@b.c").stamped_created(now),
        );

        let doc = ContentDocument::from_stored(stored);

        assert_eq!(doc.created_at(), Some(now));
        assert_eq!(doc.updated_at(), Some(now));
        assert!(!doc.fields().contains(CREATED_AT));
        assert_eq!(doc.fields().text("email"), Some("a@b.c"));
    }

    #[test]
    fn test_canonical_json_normalizes_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 10, 0, 0).unwrap();
        let stored = StoredDocument::new(
            "abc",
            Fields::new()
                .with("title", "About")
                .with("order", 2.0)
                .stamped_created(now),
        );

        let json = ContentDocument::from_stored(stored).to_canonical_json();

        assert_eq!(
            json,
            json!({
                "id": "abc",
                "title": "About",
                "order": 2.0,
                "createdAt": "2024-05-04T10:00:00.000000Z",
                "updatedAt": "2024-05-04T10:00:00.000000Z",
            })
        );
    }

    #[test]
    fn test_missing_timestamps_are_tolerated() {
        let stored = StoredDocument::new(
            "legacy",
            Fields::new().with("title", "Old").with(CREATED_AT, "yesterday"),
        );

        let doc = ContentDocument::from_stored(stored);

        assert_eq!(doc.created_at(), None);
        assert_eq!(doc.updated_at(), None);
        assert_eq!(doc.fields().len(), 1);
    }
}
