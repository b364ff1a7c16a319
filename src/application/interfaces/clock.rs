use chrono::{DateTime, Utc};

/// Source of the `createdAt` / `updatedAt` stamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
