use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `PUT /content/{key}`.
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    /// Id of the existing document, if the admin client already holds it
    #[serde(default)]
    pub id: Option<String>,

    /// Fields to write; values must be strings or numbers
    pub fields: Map<String, Value>,
}

/// Body of `PATCH /content/{key}`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub fields: Map<String, Value>,
}
