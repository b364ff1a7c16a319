//! Contract tests for the content repository.
//!
//! These run against the in-memory store and a store that always fails.

use std::sync::Arc;

use async_trait::async_trait;
use sitecontent::{
    ContactDefaults, ContentKey, ContentRepository, CreateOutcome, DocumentQuery, DocumentStore,
    DomainError, Fields, InMemoryDocumentStore, ResolvedContent, SetMode, StoredDocument,
    SystemClock,
};

fn setup() -> (ContentRepository, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let repo = ContentRepository::new(store.clone(), Arc::new(SystemClock::new()));
    (repo, store)
}

fn contact_defaults() -> Fields {
    ContactDefaults::default().into_fields()
}

/// Store whose every call fails, as if the network were down.
struct UnreachableStore;

impl UnreachableStore {
    fn error() -> DomainError {
        DomainError::storage("connection refused")
    }
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn get(&self, _: &str, _: &str) -> Result<Option<StoredDocument>, DomainError> {
        Err(Self::error())
    }

    async fn query(&self, _: &DocumentQuery) -> Result<Vec<StoredDocument>, DomainError> {
        Err(Self::error())
    }

    async fn create_if_absent(
        &self,
        _: &str,
        _: &str,
        _: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        Err(Self::error())
    }

    async fn create_if_empty(&self, _: &str, _: &Fields) -> Result<CreateOutcome, DomainError> {
        Err(Self::error())
    }

    async fn update(&self, _: &str, _: &str, _: &Fields) -> Result<(), DomainError> {
        Err(Self::error())
    }

    async fn set(&self, _: &str, _: &str, _: &Fields, _: SetMode) -> Result<(), DomainError> {
        Err(Self::error())
    }
}

fn unreachable_repository() -> ContentRepository {
    ContentRepository::new(Arc::new(UnreachableStore), Arc::new(SystemClock::new()))
}

#[tokio::test]
async fn fetch_or_initialize_seeds_contact_with_defaults() {
    let (repo, store) = setup();
    let key = ContentKey::contact();

    let resolved = repo.fetch_or_initialize(&key, &contact_defaults()).await;

    assert!(resolved.is_created());
    assert_eq!(resolved.fields().text("email"), Some("contact@example.com"));
    assert!(resolved.fields().content_eq(&contact_defaults()));

    let doc = resolved.document().expect("persisted document");
    assert_eq!(doc.id(), "mainContact");
    assert!(doc.created_at().is_some());
    assert_eq!(doc.created_at(), doc.updated_at());

    assert_eq!(store.count("contact").await, 1);
    let stored = store
        .get("contact", "mainContact")
        .await
        .expect("get")
        .expect("contact exists");
    assert_eq!(stored.fields().text("email"), Some("contact@example.com"));
}

#[tokio::test]
async fn fetch_or_initialize_twice_keeps_a_single_document() {
    let (repo, store) = setup();
    let key = ContentKey::contact();

    let first = repo.fetch_or_initialize(&key, &contact_defaults()).await;
    let second = repo.fetch_or_initialize(&key, &contact_defaults()).await;

    assert!(first.is_created());
    assert!(matches!(second, ResolvedContent::Stored(_)));
    assert_eq!(
        first.document().unwrap().created_at(),
        second.document().unwrap().created_at()
    );
    assert_eq!(store.count("contact").await, 1);
}

#[tokio::test]
async fn fetch_or_initialize_returns_stored_document_without_merging_defaults() {
    let (repo, _) = setup();
    let key = ContentKey::contact();

    repo.upsert_singleton(&key, None, &Fields::new().with("email", "me@studio.org"))
        .await;

    let resolved = repo.fetch_or_initialize(&key, &contact_defaults()).await;

    assert_eq!(resolved.fields().text("email"), Some("me@studio.org"));
    assert!(!resolved.fields().contains("title"));
}

#[tokio::test]
async fn update_fields_then_fetch_returns_the_stored_email() {
    let (repo, _) = setup();
    let key = ContentKey::contact();

    repo.fetch_or_initialize(&key, &contact_defaults()).await;
    let outcome = repo
        .update_fields(&key, "mainContact", &Fields::new().with("email", "new@x.com"))
        .await;
    assert!(outcome.is_success());
    assert_eq!(outcome.id(), Some("mainContact"));

    let resolved = repo.fetch_or_initialize(&key, &contact_defaults()).await;

    assert!(matches!(resolved, ResolvedContent::Stored(_)));
    assert_eq!(resolved.fields().text("email"), Some("new@x.com"));
    assert_eq!(resolved.fields().text("title"), Some("Get in Touch"));
}

#[tokio::test]
async fn upsert_with_known_id_keeps_created_at_and_advances_updated_at() {
    let (repo, _) = setup();
    let key = ContentKey::about();

    let created = repo
        .upsert_singleton(&key, None, &Fields::new().with("title", "About"))
        .await;
    assert!(created.is_success());
    let id = created.id().expect("generated id").to_string();

    let before = repo.fetch_singleton(&key).await.into_document().unwrap();

    let updated = repo
        .upsert_singleton(
            &key,
            Some(id.as_str()),
            &Fields::new().with("biography", "Based in Lisbon."),
        )
        .await;
    assert!(updated.is_success());
    assert_eq!(updated.id(), Some(id.as_str()));

    let after = repo.fetch_singleton(&key).await.into_document().unwrap();
    assert_eq!(after.id(), id);
    assert_eq!(after.created_at(), before.created_at());
    assert!(after.updated_at().unwrap() > before.updated_at().unwrap());
    assert_eq!(after.fields().text("title"), Some("About"));
    assert_eq!(after.fields().text("biography"), Some("Based in Lisbon."));
}

#[tokio::test]
async fn upsert_without_id_updates_the_existing_singleton() {
    let (repo, store) = setup();
    let key = ContentKey::about();

    let first = repo
        .upsert_singleton(&key, None, &Fields::new().with("title", "About"))
        .await;
    let second = repo
        .upsert_singleton(&key, None, &Fields::new().with("title", "About me"))
        .await;

    assert!(first.is_success() && second.is_success());
    assert_eq!(first.id(), second.id());
    assert_eq!(store.count("about").await, 1);

    let doc = repo.fetch_singleton(&key).await.into_document().unwrap();
    assert_eq!(doc.fields().text("title"), Some("About me"));
}

#[tokio::test]
async fn concurrent_first_reads_create_one_singleton() {
    let (repo, store) = setup();
    let key = ContentKey::about();
    let defaults = Fields::new().with("title", "About");

    let (a, b) = tokio::join!(
        repo.fetch_or_initialize(&key, &defaults),
        repo.fetch_or_initialize(&key, &defaults)
    );

    assert_eq!(store.count("about").await, 1);
    assert_eq!(a.document().unwrap().id(), b.document().unwrap().id());
    assert!(a.is_created() ^ b.is_created());
}

#[tokio::test]
async fn initialize_with_defaults_is_idempotent_for_content() {
    let (repo, store) = setup();
    let key = ContentKey::contact();

    let first = repo
        .initialize_with_defaults(&key, "mainContact", &contact_defaults())
        .await;
    assert!(first.is_success());
    let after_first = store.get("contact", "mainContact").await.unwrap().unwrap();

    let second = repo
        .initialize_with_defaults(&key, "mainContact", &contact_defaults())
        .await;
    assert!(second.is_success());
    assert_eq!(second.message(), Some("contact initialized with defaults"));
    let after_second = store.get("contact", "mainContact").await.unwrap().unwrap();

    assert!(after_first.fields().content_eq(after_second.fields()));
    assert_eq!(
        after_first.fields().timestamp("createdAt"),
        after_second.fields().timestamp("createdAt")
    );
    assert!(
        after_second.fields().timestamp("updatedAt") > after_first.fields().timestamp("updatedAt")
    );
    assert_eq!(store.count("contact").await, 1);
}

#[tokio::test]
async fn initialize_with_defaults_merges_into_existing_document() {
    let (repo, store) = setup();
    let key = ContentKey::contact();

    repo.upsert_singleton(
        &key,
        None,
        &Fields::new()
            .with("title", "Old title")
            .with("instagram", "@lens"),
    )
    .await;

    let outcome = repo
        .initialize_with_defaults(&key, "mainContact", &contact_defaults())
        .await;
    assert!(outcome.is_success());

    let stored = store.get("contact", "mainContact").await.unwrap().unwrap();
    assert_eq!(stored.fields().text("title"), Some("Get in Touch"));
    assert_eq!(stored.fields().text("instagram"), Some("@lens"));
}

#[tokio::test]
async fn fetch_singleton_distinguishes_absent_from_failure() {
    let (repo, _) = setup();
    let absent = repo.fetch_singleton(&ContentKey::about()).await;
    assert!(absent.is_absent());

    let failed = unreachable_repository()
        .fetch_singleton(&ContentKey::about())
        .await;
    assert!(failed.is_failed());
    assert!(failed.into_document().is_none());
}

#[tokio::test]
async fn read_failure_falls_back_to_defaults() {
    let repo = unreachable_repository();

    let resolved = repo
        .fetch_or_initialize(&ContentKey::contact(), &contact_defaults())
        .await;

    assert!(!resolved.is_persisted());
    assert_eq!(resolved.fields(), &contact_defaults());
    match resolved {
        ResolvedContent::Fallback { reason, .. } => assert!(reason.contains("connection refused")),
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn write_failures_are_reported_not_raised() {
    let repo = unreachable_repository();
    let key = ContentKey::contact();
    let fields = Fields::new().with("email", "new@x.com");

    let outcomes = [
        repo.upsert_singleton(&key, None, &fields).await,
        repo.upsert_singleton(&key, Some("mainContact"), &fields).await,
        repo.update_fields(&key, "mainContact", &fields).await,
        repo.initialize_with_defaults(&key, "mainContact", &contact_defaults())
            .await,
    ];

    for outcome in outcomes {
        assert!(!outcome.is_success());
        assert!(outcome.id().is_none());
        assert!(outcome.message().is_none());
        let message = outcome.error_message().expect("error message");
        assert!(message.contains("connection refused"), "{}", message);
    }
}

#[tokio::test]
async fn update_fields_on_missing_document_reports_not_found() {
    let (repo, store) = setup();

    let outcome = repo
        .update_fields(
            &ContentKey::contact(),
            "mainContact",
            &Fields::new().with("email", "new@x.com"),
        )
        .await;

    assert!(!outcome.is_success());
    assert!(outcome.error_message().unwrap().starts_with("Not found"));
    assert_eq!(store.count("contact").await, 0);
}

#[tokio::test]
async fn canonical_json_uses_iso8601_timestamps() {
    let (repo, _) = setup();
    let resolved = repo
        .fetch_or_initialize(&ContentKey::contact(), &contact_defaults())
        .await;

    let json = resolved.to_canonical_json();
    let created_at = json["createdAt"].as_str().expect("createdAt string");

    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
    assert!(created_at.ends_with('Z'));
    assert_eq!(json["createdAt"], json["updatedAt"]);
}
