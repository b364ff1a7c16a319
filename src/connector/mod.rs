//! # Connector Layer
//!
//! Implementations of the application interfaces and the outer surfaces:
//! - Document stores (DuckDB file, in-memory)
//! - System clock
//! - HTTP API and the CLI container/router

pub mod adapter;
pub mod api;

pub use adapter::*;
