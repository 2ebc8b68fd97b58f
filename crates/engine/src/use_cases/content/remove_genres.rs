//! Remove genres from a record.

use std::sync::Arc;

use catalog_domain::{require_genres, validate_remove, Content, ContentId};
use tracing::info;

use crate::repositories::ContentManager;

use super::{ContentError, ContentListCache};

/// Drops genres after re-reading the record. Same lost-update window as
/// [`AddGenres`](super::AddGenres).
pub struct RemoveGenres {
    manager: Arc<ContentManager>,
    cache: Arc<ContentListCache>,
}

impl RemoveGenres {
    pub fn new(manager: Arc<ContentManager>, cache: Arc<ContentListCache>) -> Self {
        Self { manager, cache }
    }

    /// Succeeds when at least one requested genre is on the record. The
    /// result may have no genres left.
    pub async fn execute(
        &self,
        id: ContentId,
        genres: Option<Vec<String>>,
    ) -> Result<Content, ContentError> {
        let requested = require_genres(genres.as_deref())?;

        let existing = self
            .manager
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))?;

        let remaining = validate_remove(&existing, Some(requested)).inspect_err(|e| {
            info!(content_id = %id, reason = %e, "Genre removal rejected");
        })?;

        let manager = Arc::clone(&self.manager);
        let replacement = existing.with_genres(remaining);
        let updated = self
            .cache
            .invalidate_after(async move {
                manager
                    .replace(replacement)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|updated| updated.ok_or(ContentError::NotFound(id)))
            })
            .await?;

        info!(content_id = %id, remaining = updated.genres().len(), "Genres removed");
        Ok(updated)
    }
}
