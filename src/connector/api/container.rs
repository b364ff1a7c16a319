use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{ContentRepository, DocumentStore, ShowContentUseCase};
use crate::connector::{DuckdbDocumentStore, InMemoryDocumentStore, SystemClock};
use crate::domain::{defaults_for, ContactDefaults, ContentKey, Fields};

pub const DATABASE_FILE: &str = "sitecontent.duckdb";

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep documents in process memory instead of the DuckDB file.
    pub memory_storage: bool,
    /// Defaults used when the contact document has to be seeded.
    pub contact: ContactDefaults,
}

pub struct Container {
    repository: Arc<ContentRepository>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = if config.memory_storage {
            debug!("Using in-memory document storage");
            Arc::new(InMemoryDocumentStore::new())
        } else {
            std::fs::create_dir_all(&config.data_dir)
                .with_context(|| format!("Failed to create data dir {}", config.data_dir))?;
            let db_path = PathBuf::from(&config.data_dir).join(DATABASE_FILE);
            debug!("Using DuckDB document storage at {:?}", db_path);
            Arc::new(DuckdbDocumentStore::new(&db_path)?)
        };

        Ok(Self::with_store(store, config))
    }

    /// Wires the container around an already built store.
    pub fn with_store(store: Arc<dyn DocumentStore>, config: ContainerConfig) -> Self {
        let repository = Arc::new(ContentRepository::new(store, Arc::new(SystemClock::new())));
        Self { repository, config }
    }

    pub fn repository(&self) -> Arc<ContentRepository> {
        self.repository.clone()
    }

    pub fn show_use_case(&self) -> ShowContentUseCase {
        ShowContentUseCase::new(self.repository.clone(), self.config.contact.clone())
    }

    /// Conventional defaults for `key`, if it has a known shape.
    pub fn defaults_for(&self, key: &ContentKey) -> Option<Fields> {
        defaults_for(key, &self.config.contact)
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }

    pub fn memory_storage(&self) -> bool {
        self.config.memory_storage
    }
}
