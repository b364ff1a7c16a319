use std::fmt;

use crate::domain::DomainError;

pub const ABOUT_COLLECTION: &str = "about";
pub const CONTACT_COLLECTION: &str = "contact";
pub const CONTACT_FIXED_ID: &str = "mainContact";

/// Logical key of a singleton content document.
///
/// Keys with a fixed id are addressed directly; the others are looked up by
/// querying their collection for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    collection: String,
    fixed_id: Option<String>,
}

impl ContentKey {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            fixed_id: None,
        }
    }

    pub fn with_fixed_id(collection: impl Into<String>, fixed_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            fixed_id: Some(fixed_id.into()),
        }
    }

    pub fn about() -> Self {
        Self::new(ABOUT_COLLECTION)
    }

    pub fn contact() -> Self {
        Self::with_fixed_id(CONTACT_COLLECTION, CONTACT_FIXED_ID)
    }

    /// Resolves a key name from the command line or a URL path.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_input("Content key must not be empty"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::invalid_input(format!(
                "Invalid content key '{}': use letters, digits, '-' or '_'",
                name
            )));
        }

        Ok(match name {
            CONTACT_COLLECTION => Self::contact(),
            other => Self::new(other),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn fixed_id(&self) -> Option<&str> {
        self.fixed_id.as_deref()
    }

    pub fn require_fixed_id(&self) -> Result<&str, DomainError> {
        self.fixed_id().ok_or_else(|| {
            DomainError::invalid_input(format!(
                "Content key '{}' has no fixed id",
                self.collection
            ))
        })
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fixed_id {
            Some(id) => write!(f, "{}/{}", self.collection, id),
            None => write!(f, "{}", self.collection),
        }
    }
}

/// Query hint for collection-style lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    collection: String,
    limit: usize,
}

impl DocumentQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            limit: usize::MAX,
        }
    }

    pub fn singleton(collection: impl Into<String>) -> Self {
        Self::new(collection).with_limit(1)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
