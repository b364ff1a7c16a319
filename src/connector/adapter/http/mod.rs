mod server;
mod types;

pub use server::*;
pub use types::*;
