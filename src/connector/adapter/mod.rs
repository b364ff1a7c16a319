mod duckdb_document_store;
pub mod http;
mod in_memory_document_store;
mod system_clock;

pub use duckdb_document_store::*;
pub use in_memory_document_store::*;
pub use system_clock::*;
