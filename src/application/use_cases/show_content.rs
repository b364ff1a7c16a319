use std::sync::Arc;

use crate::application::ContentRepository;
use crate::domain::{defaults_for, ContactDefaults, ContentKey, ReadOutcome, ResolvedContent};

/// What a visitor-facing read of a key produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    /// Fixed-id key with a known shape: seeded on first read.
    Resolved(ResolvedContent),
    /// Any other key: plain lookup, the caller decides what "absent" means.
    Read(ReadOutcome),
}

impl ContentView {
    /// Canonical JSON of whatever content is available.
    pub fn to_canonical_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Resolved(resolved) => Some(resolved.to_canonical_json()),
            Self::Read(outcome) => outcome.document().map(|doc| doc.to_canonical_json()),
        }
    }
}

pub struct ShowContentUseCase {
    repository: Arc<ContentRepository>,
    contact_defaults: ContactDefaults,
}

impl ShowContentUseCase {
    pub fn new(repository: Arc<ContentRepository>, contact_defaults: ContactDefaults) -> Self {
        Self {
            repository,
            contact_defaults,
        }
    }

    pub async fn execute(&self, key: &ContentKey) -> ContentView {
        match (key.fixed_id(), defaults_for(key, &self.contact_defaults)) {
            (Some(_), Some(defaults)) => {
                ContentView::Resolved(self.repository.fetch_or_initialize(key, &defaults).await)
            }
            _ => ContentView::Read(self.repository.fetch_singleton(key).await),
        }
    }
}
