use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::application::{Clock, CreateOutcome, DocumentStore, SetMode};
use crate::domain::{
    ContentKey, DocumentQuery, DomainError, Fields, ReadOutcome, ResolvedContent, StoredDocument,
    WriteOutcome, UPDATED_AT,
};

/// Typed access to the singleton content documents of the site.
///
/// Reads never fail visibly: they degrade to "absent" or to the supplied
/// defaults and log the cause. Writes report failures as a `WriteOutcome`.
/// Nothing is cached between calls.
pub struct ContentRepository {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn fetch_singleton(&self, key: &ContentKey) -> ReadOutcome {
        match self.read_singleton(key).await {
            Ok(Some(stored)) => {
                debug!("Fetched {} ({})", key, stored.id());
                ReadOutcome::Found(stored.into())
            }
            Ok(None) => {
                debug!("No document stored for {}", key);
                ReadOutcome::Absent
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", key, e);
                ReadOutcome::Failed(e.to_string())
            }
        }
    }

    /// Returns the stored document, creating it from `defaults` when absent.
    /// A stored document is returned as-is, without merging in `defaults`.
    pub async fn fetch_or_initialize(
        &self,
        key: &ContentKey,
        defaults: &Fields,
    ) -> ResolvedContent {
        match self.try_fetch_or_initialize(key, defaults).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Failed to load {}, serving defaults: {}", key, e);
                ResolvedContent::Fallback {
                    fields: defaults.clone().without_system_fields(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Partial update when `existing_id` is known, create otherwise.
    pub async fn upsert_singleton(
        &self,
        key: &ContentKey,
        existing_id: Option<&str>,
        fields: &Fields,
    ) -> WriteOutcome {
        let result = self.save(key, existing_id, fields).await;
        self.report(key, "Saved", result)
    }

    /// Unconditional partial update of the document at `fixed_id`.
    pub async fn update_fields(
        &self,
        key: &ContentKey,
        fixed_id: &str,
        partial: &Fields,
    ) -> WriteOutcome {
        let result = async {
            let partial = Self::writable(partial)?;
            self.apply_update(key.collection(), fixed_id, &partial).await?;
            Ok::<_, DomainError>(fixed_id.to_string())
        }
        .await;
        self.report(key, "Updated", result)
    }

    /// Idempotent seed: merges `defaults` into the document at `fixed_id`.
    ///
    /// `createdAt` is only written when the document is first created.
    pub async fn initialize_with_defaults(
        &self,
        key: &ContentKey,
        fixed_id: &str,
        defaults: &Fields,
    ) -> WriteOutcome {
        let result = async {
            let defaults = Self::writable(defaults)?;
            self.seed(key.collection(), fixed_id, defaults).await?;
            Ok::<_, DomainError>(fixed_id.to_string())
        }
        .await;
        self.report(key, "Initialized", result).with_success_message(format!(
            "{} initialized with defaults",
            key.collection()
        ))
    }

    async fn read_singleton(
        &self,
        key: &ContentKey,
    ) -> Result<Option<StoredDocument>, DomainError> {
        match key.fixed_id() {
            Some(id) => self.store.get(key.collection(), id).await,
            None => {
                let query = DocumentQuery::singleton(key.collection());
                Ok(self.store.query(&query).await?.into_iter().next())
            }
        }
    }

    async fn try_fetch_or_initialize(
        &self,
        key: &ContentKey,
        defaults: &Fields,
    ) -> Result<ResolvedContent, DomainError> {
        if let Some(stored) = self.read_singleton(key).await? {
            return Ok(ResolvedContent::Stored(stored.into()));
        }

        let fields = Self::writable(defaults)?.stamped_created(self.clock.now());

        match self.create_singleton(key, &fields).await? {
            CreateOutcome::Created(stored) => {
                info!("Initialized {} with defaults ({})", key, stored.id());
                Ok(ResolvedContent::Created(stored.into()))
            }
            CreateOutcome::Existing(stored) => {
                debug!("{} was created by another writer", key);
                Ok(ResolvedContent::Stored(stored.into()))
            }
        }
    }

    async fn create_singleton(
        &self,
        key: &ContentKey,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        match key.fixed_id() {
            Some(id) => self.store.create_if_absent(key.collection(), id, fields).await,
            None => self.store.create_if_empty(key.collection(), fields).await,
        }
    }

    async fn save(
        &self,
        key: &ContentKey,
        existing_id: Option<&str>,
        fields: &Fields,
    ) -> Result<String, DomainError> {
        let fields = Self::writable(fields)?;
        match existing_id {
            Some(id) => {
                self.apply_update(key.collection(), id, &fields).await?;
                Ok(id.to_string())
            }
            None => self.create_or_update(key, &fields).await,
        }
    }

    async fn create_or_update(
        &self,
        key: &ContentKey,
        fields: &Fields,
    ) -> Result<String, DomainError> {
        let created = fields.clone().stamped_created(self.clock.now());

        match self.create_singleton(key, &created).await? {
            CreateOutcome::Created(stored) => Ok(stored.id().to_string()),
            CreateOutcome::Existing(stored) => {
                // Singleton already there: apply the fields to it instead.
                self.update_existing(key.collection(), &stored, fields).await?;
                Ok(stored.id().to_string())
            }
        }
    }

    async fn apply_update(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let stored = self
            .store
            .get(collection, id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("{}/{}", collection, id)))?;
        self.update_existing(collection, &stored, fields).await
    }

    async fn update_existing(
        &self,
        collection: &str,
        stored: &StoredDocument,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let stamp = self.next_stamp(stored);
        let fields = fields.clone().stamped_updated(stamp);
        self.store.update(collection, stored.id(), &fields).await
    }

    async fn seed(&self, collection: &str, id: &str, defaults: Fields) -> Result<(), DomainError> {
        let created = defaults.clone().stamped_created(self.clock.now());

        match self.store.create_if_absent(collection, id, &created).await? {
            CreateOutcome::Created(_) => Ok(()),
            CreateOutcome::Existing(stored) => {
                let merged = defaults.stamped_updated(self.next_stamp(&stored));
                self.store.set(collection, id, &merged, SetMode::Merge).await
            }
        }
    }

    /// Strips system fields and rejects values the store could not read back.
    fn writable(fields: &Fields) -> Result<Fields, DomainError> {
        let fields = fields.clone().without_system_fields();
        fields.validate()?;
        Ok(fields)
    }

    /// `updatedAt` for the next write to `stored`: the clock, or one
    /// microsecond past the stored stamp if the clock is behind it.
    fn next_stamp(&self, stored: &StoredDocument) -> DateTime<Utc> {
        let now = self.clock.now();
        match stored.fields().timestamp(UPDATED_AT) {
            Some(previous) if previous >= now => previous + Duration::microseconds(1),
            _ => now,
        }
    }

    fn report(
        &self,
        key: &ContentKey,
        action: &str,
        result: Result<String, DomainError>,
    ) -> WriteOutcome {
        match result {
            Ok(id) => {
                info!("{} {} ({})", action, key, id);
                WriteOutcome::succeeded(id)
            }
            Err(e) => {
                warn!("Write to {} failed: {}", key, e);
                WriteOutcome::failed(e.to_string())
            }
        }
    }
}
