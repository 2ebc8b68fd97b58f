//! Content manager - one operation per verb over the content store.
//!
//! Knows nothing about caching. Assigns identifiers on create and builds the
//! merged record on update so storage only ever sees whole records.

use std::sync::Arc;

use catalog_domain::{Content, ContentId, ContentPatch, DomainError};
use tracing::instrument;

use crate::infrastructure::ports::{ContentRepo, RepoError};

/// Failures of manager operations that validate their payload first.
#[derive(Debug, thiserror::Error)]
pub enum ContentManagerError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Content record operations.
pub struct ContentManager {
    repo: Arc<dyn ContentRepo>,
}

impl ContentManager {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Self {
        Self { repo }
    }

    /// Every stored record, in storage order.
    #[instrument(skip(self))]
    pub async fn get_many(&self) -> Result<Vec<Content>, RepoError> {
        self.repo.list_all().await
    }

    #[instrument(skip(self), fields(content_id = %id))]
    pub async fn get(&self, id: ContentId) -> Result<Option<Content>, RepoError> {
        self.repo.get(id).await
    }

    /// Validate a creation payload, assign a fresh id and store the record.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ContentPatch) -> Result<Content, ContentManagerError> {
        let content = Content::create(ContentId::new(), input)?;
        self.repo.insert(&content).await?;
        Ok(content)
    }

    /// Merge `patch` into the stored record and write the result back wholesale.
    ///
    /// Returns `None` when no record has this id.
    #[instrument(skip(self, patch), fields(content_id = %id))]
    pub async fn update(
        &self,
        id: ContentId,
        patch: &ContentPatch,
    ) -> Result<Option<Content>, ContentManagerError> {
        patch.validate()?;

        let Some(existing) = self.repo.get(id).await? else {
            return Ok(None);
        };
        let merged = patch.merge(&existing);
        Ok(self.repo.replace(&merged).await?)
    }

    /// Write an already-built record over the stored one.
    #[instrument(skip(self, content), fields(content_id = %content.id()))]
    pub async fn replace(&self, content: Content) -> Result<Option<Content>, RepoError> {
        self.repo.replace(&content).await
    }

    /// Remove a record. Succeeds whether or not it existed.
    #[instrument(skip(self), fields(content_id = %id))]
    pub async fn delete(&self, id: ContentId) -> Result<ContentId, RepoError> {
        self.repo.delete(id).await
    }
}
