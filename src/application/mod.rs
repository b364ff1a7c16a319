//! # Application Layer
//!
//! The content repository, the interfaces it needs from the outside world and
//! the use cases built on top of it.

mod content_repository;
pub mod interfaces;
pub mod use_cases;

pub use content_repository::*;
pub use interfaces::*;
pub use use_cases::*;
