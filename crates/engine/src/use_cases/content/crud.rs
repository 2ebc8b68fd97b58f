//! Catalog reads and whole-record mutations.

use std::sync::Arc;

use catalog_domain::{Content, ContentFilter, ContentId, ContentPatch};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::repositories::ContentManager;

use super::{ContentError, ContentListCache};

/// List, get, create, update and delete, with cache invalidation after each
/// successful write.
pub struct ContentCrud {
    manager: Arc<ContentManager>,
    cache: Arc<ContentListCache>,
    shutdown: CancellationToken,
}

impl ContentCrud {
    pub fn new(
        manager: Arc<ContentManager>,
        cache: Arc<ContentListCache>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            manager,
            cache,
            shutdown,
        }
    }

    /// Records from the cached snapshot that match `filter`, in snapshot order.
    pub async fn list(&self, filter: &ContentFilter) -> Result<Vec<Content>, ContentError> {
        let snapshot = self.cache.read_cancellable(&self.shutdown).await?;
        Ok(filter.apply(&snapshot))
    }

    /// A live snapshot is authoritative; storage is only asked without one.
    pub async fn get(&self, id: ContentId) -> Result<Content, ContentError> {
        if let Some(snapshot) = self.cache.peek().await {
            return snapshot
                .iter()
                .find(|c| c.id() == id)
                .cloned()
                .ok_or(ContentError::NotFound(id));
        }

        self.manager
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))
    }

    pub async fn create(&self, input: &ContentPatch) -> Result<Content, ContentError> {
        let manager = Arc::clone(&self.manager);
        let input = input.clone();
        let created = self
            .cache
            .invalidate_after(async move {
                manager.create(&input).await.map_err(ContentError::from)
            })
            .await?;

        info!(content_id = %created.id(), title = %created.title(), "Content created");
        Ok(created)
    }

    pub async fn update(&self, id: ContentId, patch: &ContentPatch) -> Result<Content, ContentError> {
        let manager = Arc::clone(&self.manager);
        let patch = patch.clone();
        let updated = self
            .cache
            .invalidate_after(async move {
                manager
                    .update(id, &patch)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|updated| updated.ok_or(ContentError::NotFound(id)))
            })
            .await?;

        info!(content_id = %id, "Content updated");
        Ok(updated)
    }

    /// Idempotent; the id is returned whether or not a record existed.
    pub async fn delete(&self, id: ContentId) -> Result<ContentId, ContentError> {
        let manager = Arc::clone(&self.manager);
        let deleted = self
            .cache
            .invalidate_after(async move {
                manager.delete(id).await.map_err(ContentError::from)
            })
            .await?;

        info!(content_id = %deleted, "Content deleted");
        Ok(deleted)
    }
}
