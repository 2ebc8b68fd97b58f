//! Value objects - Immutable objects defined by their attributes

mod content_filter;
mod content_patch;
mod genre_edit;

// Partial updates and field-level merging
pub use content_patch::{merge, ContentPatch};

// Genre add/remove rules
pub use genre_edit::{require_genres, validate_add, validate_remove, GenreEditError};

// Listing filters
pub use content_filter::ContentFilter;
