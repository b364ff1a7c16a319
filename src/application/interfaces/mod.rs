mod clock;
mod document_store;

pub use clock::*;
pub use document_store::*;
