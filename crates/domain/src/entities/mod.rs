//! Domain entities

mod content;

pub use content::Content;
