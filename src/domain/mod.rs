//! # Domain Layer
//!
//! Content documents, their field values and the outcomes reported to callers.
//! This layer is independent of any store or transport.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
