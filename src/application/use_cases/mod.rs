mod show_content;

pub use show_content::*;
