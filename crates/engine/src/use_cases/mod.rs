//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate repositories and the list cache to fulfill user stories.

pub mod content;

// Re-export main types
pub use content::{ContentError, ContentUseCases};
