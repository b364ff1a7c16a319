use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::{CreateOutcome, DocumentStore, SetMode};
use crate::domain::{DocumentQuery, DomainError, Fields, StoredDocument};

/// Document store persisted in a DuckDB file.
///
/// Each document is one row; its fields are kept as tagged JSON text so
/// timestamps come back as timestamps.
pub struct DuckdbDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbDocumentStore {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                fields TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB documents schema initialized");
        Ok(())
    }

    fn fetch_fields(
        conn: &Connection,
        collection: &str,
        id: &str,
    ) -> Result<Option<Fields>, DomainError> {
        let mut stmt = conn
            .prepare("SELECT fields FROM documents WHERE collection = ?1 AND id = ?2")
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![collection, id], |row| row.get::<_, String>(0)) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read document {}/{}: {}",
                collection, id, e
            ))),
        }
    }

    fn first_document(
        conn: &Connection,
        collection: &str,
    ) -> Result<Option<StoredDocument>, DomainError> {
        Ok(Self::select(conn, collection, 1)?.into_iter().next())
    }

    fn select(
        conn: &Connection,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, DomainError> {
        let limit = limit.min(i64::MAX as usize);
        let sql = format!(
            "SELECT id, fields FROM documents WHERE collection = ?1 ORDER BY id LIMIT {}",
            limit
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| DomainError::storage(format!("Failed to query documents: {}", e)))?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, json) =
                row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            documents.push(StoredDocument::new(id, serde_json::from_str(&json)?));
        }
        Ok(documents)
    }

    fn insert(
        conn: &Connection,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let json = serde_json::to_string(fields)?;
        conn.execute(
            "INSERT INTO documents (collection, id, fields) VALUES (?1, ?2, ?3)",
            params![collection, id, json],
        )
        .map_err(|e| DomainError::storage(format!("Failed to create document: {}", e)))?;
        Ok(())
    }

    fn upsert(
        conn: &Connection,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let json = serde_json::to_string(fields)?;
        conn.execute(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (collection, id) DO UPDATE SET fields = excluded.fields
            "#,
            params![collection, id, json],
        )
        .map_err(|e| DomainError::storage(format!("Failed to write document: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for DuckdbDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError> {
        let conn = self.conn.lock().await;
        Ok(Self::fetch_fields(&conn, collection, id)?.map(|fields| StoredDocument::new(id, fields)))
    }

    async fn query(&self, query: &DocumentQuery) -> Result<Vec<StoredDocument>, DomainError> {
        let conn = self.conn.lock().await;
        Self::select(&conn, query.collection(), query.limit())
    }

    async fn create_if_absent(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        if let Some(existing) = Self::fetch_fields(&tx, collection, id)? {
            return Ok(CreateOutcome::Existing(StoredDocument::new(id, existing)));
        }

        Self::insert(&tx, collection, id, fields)?;
        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!("Created document {}/{} in DuckDB", collection, id);
        Ok(CreateOutcome::Created(StoredDocument::new(id, fields.clone())))
    }

    async fn create_if_empty(
        &self,
        collection: &str,
        fields: &Fields,
    ) -> Result<CreateOutcome, DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        if let Some(existing) = Self::first_document(&tx, collection)? {
            return Ok(CreateOutcome::Existing(existing));
        }

        let id = Uuid::new_v4().to_string();
        Self::insert(&tx, collection, &id, fields)?;
        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!("Created document {}/{} in DuckDB", collection, id);
        Ok(CreateOutcome::Created(StoredDocument::new(id, fields.clone())))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let mut stored = Self::fetch_fields(&tx, collection, id)?
            .ok_or_else(|| DomainError::not_found(format!("{}/{}", collection, id)))?;
        stored.merge(fields);

        let json = serde_json::to_string(&stored)?;
        tx.execute(
            "UPDATE documents SET fields = ?1 WHERE collection = ?2 AND id = ?3",
            params![json, collection, id],
        )
        .map_err(|e| DomainError::storage(format!("Failed to update document: {}", e)))?;
        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!("Updated {} fields on {}/{}", fields.len(), collection, id);
        Ok(())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
        mode: SetMode,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let document = match mode {
            SetMode::Merge => match Self::fetch_fields(&tx, collection, id)? {
                Some(stored) => stored.merged(fields),
                None => fields.clone(),
            },
            SetMode::Replace => fields.clone(),
        };

        Self::upsert(&tx, collection, id, &document)?;
        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!("Set {}/{} ({:?})", collection, id, mode);
        Ok(())
    }
}
