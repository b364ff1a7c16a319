use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::{CreateOutcome, DocumentStore, SetMode};
use crate::domain::{DocumentQuery, DomainError, Fields, StoredDocument};

type Collection = BTreeMap<String, Fields>;

pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<String, Collection>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of documents held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().await;
        collections.get(collection).map_or(0, |docs| docs.len())
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| StoredDocument::new(id, fields.clone())))
    }

    async fn query(&self, query: &DocumentQuery) -> Result<Vec<StoredDocument>, DomainError> {
        let collections = self.collections.lock().await;
        let docs = match collections.get(query.collection()) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };

        Ok(docs
            .iter()
            .take(query.limit())
            .map(|(id, fields)| StoredDocument::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn create_if_absent(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.get(id) {
            return Ok(CreateOutcome::Existing(StoredDocument::new(
                id,
                existing.clone(),
            )));
        }

        docs.insert(id.to_string(), fields.clone());
        debug!("Created {}/{} in memory", collection, id);
        Ok(CreateOutcome::Created(StoredDocument::new(id, fields.clone())))
    }

    async fn create_if_empty(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some((id, existing)) = docs.iter().next() {
            return Ok(CreateOutcome::Existing(StoredDocument::new(
                id.clone(),
                existing.clone(),
            )));
        }

        let id = Uuid::new_v4().to_string();
        docs.insert(id.clone(), fields.clone());
        debug!("Created {}/{} in memory", collection, id);
        Ok(CreateOutcome::Created(StoredDocument::new(id, fields.clone())))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let mut collections = self.collections.lock().await;
        let stored = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| DomainError::not_found(format!("{}/{}", collection, id)))?;

        stored.merge(fields);
        Ok(())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
        mode: SetMode,
    ) -> Result<(), DomainError> {
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if mode == SetMode::Merge {
            if let Some(stored) = docs.get_mut(id) {
                stored.merge(fields);
                return Ok(());
            }
        }

        docs.insert(id.to_string(), fields.clone());
        Ok(())
    }
}
