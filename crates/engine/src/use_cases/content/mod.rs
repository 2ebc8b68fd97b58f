//! Content use cases.
//!
//! Every write goes to storage first and invalidates the list cache only after
//! storage confirmed it.

mod add_genres;
mod crud;
mod list_cache;
mod remove_genres;

use std::sync::Arc;

use catalog_domain::{ContentId, DomainError, GenreEditError};

use crate::infrastructure::ports::RepoError;
use crate::repositories::ContentManagerError;

pub use add_genres::AddGenres;
pub use crud::ContentCrud;
pub use list_cache::ContentListCache;
pub use remove_genres::RemoveGenres;

/// Container for content use cases.
pub struct ContentUseCases {
    pub crud: Arc<ContentCrud>,
    pub add_genres: Arc<AddGenres>,
    pub remove_genres: Arc<RemoveGenres>,
    pub cache: Arc<ContentListCache>,
}

impl ContentUseCases {
    pub fn new(
        crud: Arc<ContentCrud>,
        add_genres: Arc<AddGenres>,
        remove_genres: Arc<RemoveGenres>,
        cache: Arc<ContentListCache>,
    ) -> Self {
        Self {
            crud,
            add_genres,
            remove_genres,
            cache,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content not found: {0}")]
    NotFound(ContentId),
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error(transparent)]
    GenreEdit(#[from] GenreEditError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<ContentManagerError> for ContentError {
    fn from(err: ContentManagerError) -> Self {
        match err {
            ContentManagerError::Validation(e) => Self::Validation(e),
            ContentManagerError::Repo(e) => Self::Repo(e),
        }
    }
}
