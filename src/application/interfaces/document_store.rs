use async_trait::async_trait;

use crate::domain::{DocumentQuery, DomainError, Fields, StoredDocument};

/// How a full `set` treats fields already on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Keep stored fields that the write does not mention.
    Merge,
    /// Replace the whole field set.
    Replace,
}

/// Result of a conditional create.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(StoredDocument),
    /// Nothing was written; this is what the store already held.
    Existing(StoredDocument),
}

impl CreateOutcome {
    pub fn document(&self) -> &StoredDocument {
        match self {
            Self::Created(doc) | Self::Existing(doc) => doc,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Remote document database holding the site content.
///
/// Every call is atomic for a single document. Sequences of calls are not.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError>;

    /// Documents of a collection ordered by id, at most `query.limit()` of them.
    async fn query(&self, query: &DocumentQuery) -> Result<Vec<StoredDocument>, DomainError>;

    /// Creates the document at `id` unless one is already there.
    async fn create_if_absent(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError>;

    /// Creates a document with a generated id unless the collection already
    /// holds one, in which case the first document by id is returned.
    async fn create_if_empty(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError>;

    /// Partial update; fails with `NotFound` when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: &Fields)
        -> Result<(), DomainError>;

    /// Writes the document whether or not it exists.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
        mode: SetMode,
    ) -> Result<(), DomainError>;
}
