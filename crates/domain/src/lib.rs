extern crate self as catalog_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::Content;
pub use error::DomainError;
pub use ids::ContentId;
pub use value_objects::{
    merge, require_genres, validate_add, validate_remove, ContentFilter, ContentPatch,
    GenreEditError,
};
