//! Repository port traits for database access.

use async_trait::async_trait;
use catalog_domain::{Content, ContentId};

use super::error::RepoError;

// =============================================================================
// Content Storage
// =============================================================================

/// Persistence for catalog records. Knows nothing about caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// Every stored record, in insertion order. Empty when nothing is stored.
    async fn list_all(&self) -> Result<Vec<Content>, RepoError>;

    async fn get(&self, id: ContentId) -> Result<Option<Content>, RepoError>;

    /// Store a new record. The identifier is already assigned.
    async fn insert(&self, content: &Content) -> Result<(), RepoError>;

    /// Replace the record with the same id wholesale.
    /// Returns `None` when no such record exists.
    async fn replace(&self, content: &Content) -> Result<Option<Content>, RepoError>;

    /// Idempotent: returns `id` whether or not a record existed.
    async fn delete(&self, id: ContentId) -> Result<ContentId, RepoError>;
}
