//! Repository modules - Data access wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the interface
//! for use cases to access persisted records.

pub mod content;

pub use content::{ContentManager, ContentManagerError};
