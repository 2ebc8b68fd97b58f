//! Add genres to a record.

use std::sync::Arc;

use catalog_domain::{require_genres, validate_add, Content, ContentId};
use tracing::info;

use crate::repositories::ContentManager;

use super::{ContentError, ContentListCache};

/// Appends genres after re-reading the record.
///
/// The read, the check and the write are not atomic. Two concurrent edits of
/// the same record can overwrite each other.
pub struct AddGenres {
    manager: Arc<ContentManager>,
    cache: Arc<ContentListCache>,
}

impl AddGenres {
    pub fn new(manager: Arc<ContentManager>, cache: Arc<ContentListCache>) -> Self {
        Self { manager, cache }
    }

    pub async fn execute(
        &self,
        id: ContentId,
        genres: Option<Vec<String>>,
    ) -> Result<Content, ContentError> {
        // Empty input never reaches storage
        let requested = require_genres(genres.as_deref())?;

        let existing = self
            .manager
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))?;

        let merged = validate_add(&existing, Some(requested)).inspect_err(|e| {
            info!(content_id = %id, reason = %e, "Genre add rejected");
        })?;

        let manager = Arc::clone(&self.manager);
        let replacement = existing.with_genres(merged);
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

        info!(content_id = %id, added = requested.len(), "Genres added");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::memory::{sample_contents, InMemoryContentRepo, SlowAckContentRepo};
    use crate::infrastructure::ports::MockContentRepo;
    use catalog_domain::GenreEditError;
    use chrono::{Duration, TimeZone, Utc};

    fn record(id: ContentId, genres: &[&str]) -> Content {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        Content::from_parts(
            id,
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "https://images.example.com/a.jpg".to_string(),
            30,
            start,
            start + Duration::minutes(30),
            genres.iter().map(|g| g.to_string()).collect(),
        )
    }

    fn use_case(repo: MockContentRepo) -> AddGenres {
        let manager = Arc::new(ContentManager::new(Arc::new(repo)));
        let clock = Arc::new(FixedClock(Utc::now()));
        let cache = Arc::new(ContentListCache::new(
            Arc::clone(&manager),
            clock,
            Duration::minutes(15),
        ));
        AddGenres::new(manager, cache)
    }

    #[tokio::test]
    async fn appends_in_order() {
        let id = ContentId::new();
        let mut repo = MockContentRepo::new();
        repo.expect_get()
            .returning(move |id| Ok(Some(record(id, &["x"]))));
        repo.expect_replace()
            .withf(|c: &Content| c.genres() == ["x", "y", "z"])
            .times(1)
            .returning(|c| Ok(Some(c.clone())));

        let updated = use_case(repo)
            .execute(id, Some(vec!["y".to_string(), "z".to_string()]))
            .await
            .unwrap();

        assert_eq!(updated.genres(), ["x", "y", "z"]);
    }

    #[tokio::test]
    async fn empty_or_missing_input_skips_storage() {
        let mut repo = MockContentRepo::new();
        repo.expect_get().never();
        repo.expect_replace().never();
        let add = use_case(repo);

        for input in [None, Some(Vec::new())] {
            let result = add.execute(ContentId::new(), input).await;
            assert!(matches!(
                result,
                Err(ContentError::GenreEdit(GenreEditError::EmptyInput))
            ));
        }
    }

    #[tokio::test]
    async fn duplicate_genre_issues_no_write() {
        let mut repo = MockContentRepo::new();
        repo.expect_get()
            .times(1)
            .returning(|id| Ok(Some(record(id, &["x"]))));
        repo.expect_replace().never();

        let result = use_case(repo)
            .execute(ContentId::new(), Some(vec!["x".to_string()]))
            .await;

        assert!(matches!(
            result,
            Err(ContentError::GenreEdit(GenreEditError::DuplicateGenre(ref dup))) if dup == &["x"]
        ));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let mut repo = MockContentRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_replace().never();

        let result = use_case(repo)
            .execute(ContentId::new(), Some(vec!["x".to_string()]))
            .await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn record_deleted_between_read_and_write_is_not_found() {
        let mut repo = MockContentRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(record(id, &[]))));
        repo.expect_replace().returning(|_| Ok(None));

        let result = use_case(repo)
            .execute(ContentId::new(), Some(vec!["x".to_string()]))
            .await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn add_dropped_after_commit_still_invalidates() {
        let samples = sample_contents(Utc::now());
        let id = samples[0].id();
        let repo = SlowAckContentRepo::new(
            InMemoryContentRepo::new().with_contents(samples),
            std::time::Duration::from_millis(50),
        );
        let manager = Arc::new(ContentManager::new(Arc::new(repo)));
        let cache = Arc::new(ContentListCache::new(
            Arc::clone(&manager),
            Arc::new(FixedClock(Utc::now())),
            Duration::minutes(15),
        ));
        let add = AddGenres::new(manager, Arc::clone(&cache));
        cache.read().await.unwrap();

        let dropped = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            add.execute(id, Some(vec!["Weather".to_string()])),
        )
        .await;
        assert!(dropped.is_err());
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let snapshot = cache.read().await.unwrap();
        assert_eq!(snapshot[0].genres(), ["News", "Weather"]);
    }
}
