use serde::{Deserialize, Serialize};

use super::{ContentDocument, Fields};

/// Result of a read that never raises.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(ContentDocument),
    Absent,
    /// The store could not be read; the reason has already been logged.
    Failed(String),
}

impl ReadOutcome {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn document(&self) -> Option<&ContentDocument> {
        match self {
            Self::Found(doc) => Some(doc),
            _ => None,
        }
    }

    /// Collapses a failed read into "no data".
    pub fn into_document(self) -> Option<ContentDocument> {
        match self {
            Self::Found(doc) => Some(doc),
            Self::Absent | Self::Failed(_) => None,
        }
    }
}

/// Content returned by a read that seeds defaults when nothing is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent {
    /// The document already existed and is returned as stored.
    Stored(ContentDocument),
    /// The document was absent and has just been created from the defaults.
    Created(ContentDocument),
    /// The store failed; the defaults are returned without being persisted.
    Fallback { fields: Fields, reason: String },
}

impl ResolvedContent {
    pub fn fields(&self) -> &Fields {
        match self {
            Self::Stored(doc) | Self::Created(doc) => doc.fields(),
            Self::Fallback { fields, .. } => fields,
        }
    }

    pub fn document(&self) -> Option<&ContentDocument> {
        match self {
            Self::Stored(doc) | Self::Created(doc) => Some(doc),
            Self::Fallback { .. } => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::Fallback { .. })
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn to_canonical_json(&self) -> serde_json::Value {
        match self {
            Self::Stored(doc) | Self::Created(doc) => doc.to_canonical_json(),
            Self::Fallback { fields, .. } => serde_json::Value::Object(fields.to_canonical_json()),
        }
    }
}

/// Structured result of a write, rendered by admin screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOutcome {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl WriteOutcome {
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
            message: None,
            error_message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches `message` only when the write succeeded.
    pub fn with_success_message(self, message: impl Into<String>) -> Self {
        if self.success {
            self.with_message(message)
        } else {
            self
        }
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
