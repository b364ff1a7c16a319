mod content_document;
mod content_key;
mod field_value;
mod fields;
mod outcome;
mod schemas;

pub use content_document::*;
pub use content_key::*;
pub use field_value::*;
pub use fields::*;
pub use outcome::*;
pub use schemas::*;
