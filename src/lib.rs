pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    Clock, ContentRepository, ContentView, CreateOutcome, DocumentStore, SetMode,
    ShowContentUseCase,
};

pub use cli::Commands;

pub use connector::{DuckdbDocumentStore, InMemoryDocumentStore, SystemClock};

pub use domain::{
    AboutDefaults, ContactDefaults, ContentDocument, ContentKey, DocumentQuery, DomainError,
    FieldValue, Fields, ReadOutcome, ResolvedContent, StoredDocument, WriteOutcome,
};
