use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::FieldValue;
use crate::domain::DomainError;

pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// Schema-less field map of a content document, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn timestamp(&self, name: &str) -> Option<DateTime<Utc>> {
        self.get(name).and_then(FieldValue::as_timestamp)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge write: fields in `other` win, everything else is kept.
    pub fn merge(&mut self, other: &Fields) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn merged(mut self, other: &Fields) -> Self {
        self.merge(other);
        self
    }

    pub fn without_system_fields(mut self) -> Self {
        self.0.remove(CREATED_AT);
        self.0.remove(UPDATED_AT);
        self
    }

    /// Equality that ignores `createdAt` and `updatedAt`.
    pub fn content_eq(&self, other: &Fields) -> bool {
        self.clone().without_system_fields() == other.clone().without_system_fields()
    }

    pub fn stamped_created(self, now: DateTime<Utc>) -> Self {
        self.with(CREATED_AT, now).with(UPDATED_AT, now)
    }

    pub fn stamped_updated(self, now: DateTime<Utc>) -> Self {
        self.with(UPDATED_AT, now)
    }

    pub fn to_canonical_json(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_canonical_json()))
            .collect()
    }

    /// Rejects values a store could not read back.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.0
            .iter()
            .try_for_each(|(name, value)| value.validate(name))
    }

    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, DomainError> {
        let mut fields = Self::new();
        for (name, value) in object {
            fields.insert(name.clone(), FieldValue::from_json(name, value)?);
        }
        Ok(fields)
    }

    /// Builds a field map from `name=value` pairs.
    pub fn from_assignments<S: AsRef<str>>(pairs: &[S]) -> Result<Self, DomainError> {
        let mut fields = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, raw) = pair.split_once('=').ok_or_else(|| {
                DomainError::invalid_input(format!("Expected name=value, got '{}'", pair))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::invalid_input(format!(
                    "Missing field name in '{}'",
                    pair
                )));
            }
            fields.insert(name, FieldValue::parse_literal(raw));
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_merge_overwrites_shared_and_keeps_others() {
        let mut stored = Fields::new()
            .with("title", "Contact")
            .with("phone", "+1 555 0100");
        let incoming = Fields::new()
            .with("title", "Get in touch")
            .with("email", "me@example.com");

        stored.merge(&incoming);

        assert_eq!(stored.text("title"), Some("Get in touch"));
        assert_eq!(stored.text("phone"), Some("+1 555 0100"));
        assert_eq!(stored.text("email"), Some("me@example.com"));
    }

    #[test]
    fn test_system_fields_are_stripped() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fields = Fields::new().with("title", "About").stamped_created(now);

        assert!(fields.contains(CREATED_AT));
        let stripped = fields.without_system_fields();
        assert!(!stripped.contains(CREATED_AT));
        assert!(!stripped.contains(UPDATED_AT));
        assert_eq!(stripped.len(), 1);
    }

    #[test]
    fn test_content_eq_ignores_timestamps() {
        let a = Fields::new()
            .with("title", "About")
            .stamped_created(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let b = Fields::new()
            .with("title", "About")
            .stamped_created(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());

        assert!(a.content_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_assignments() {
        let fields =
            Fields::from_assignments(&["email=new@x.com", "order=3", "location= Berlin"]).unwrap();

        assert_eq!(fields.text("email"), Some("new@x.com"));
        assert_eq!(fields.get("order"), Some(&FieldValue::Number(3.0)));
        assert_eq!(fields.text("location"), Some(" Berlin"));

        assert!(Fields::from_assignments(&["no-equals-sign"]).is_err());
        assert!(Fields::from_assignments(&["=value"]).is_err());
    }

    #[test]
    fn test_from_assignments_keeps_phone_numbers_as_text() {
        let fields = Fields::from_assignments(&["phone=0049301234567", "zip=01234"]).unwrap();

        assert_eq!(fields.text("phone"), Some("0049301234567"));
        assert_eq!(fields.text("zip"), Some("01234"));
    }

    #[test]
    fn test_validate_names_the_offending_field() {
        let err = Fields::new()
            .with("title", "About")
            .with("order", f64::NAN)
            .validate()
            .unwrap_err();

        assert!(err.to_string().contains("order"));
        assert!(Fields::new().with("order", 2.0).validate().is_ok());
    }
}
