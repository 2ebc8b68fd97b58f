//! Cache-aside snapshot of the whole catalog.
//!
//! One slot holds every record. Single-record reads may look at it but never
//! fill it; only [`ContentListCache::read`] populates the slot.

use std::future::Future;
use std::sync::Arc;

use catalog_domain::Content;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::infrastructure::cache::{Lookup, TtlSlot};
use crate::infrastructure::ports::{ClockPort, RepoError};
use crate::repositories::ContentManager;

use super::ContentError;

/// Time-limited cache of the full content list.
pub struct ContentListCache {
    manager: Arc<ContentManager>,
    clock: Arc<dyn ClockPort>,
    slot: TtlSlot<Vec<Content>>,
}

impl ContentListCache {
    pub fn new(
        manager: Arc<ContentManager>,
        clock: Arc<dyn ClockPort>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            manager,
            clock,
            slot: TtlSlot::new(ttl),
        }
    }

    /// The live snapshot, loading it from storage on a miss.
    ///
    /// Storage failures propagate and leave the slot untouched.
    pub async fn read(&self) -> Result<Arc<Vec<Content>>, RepoError> {
        let ticket = match self.slot.lookup(self.clock.now()).await {
            Lookup::Hit(snapshot) => {
                debug!(count = snapshot.len(), "Content list cache hit");
                return Ok(snapshot);
            }
            Lookup::Miss(ticket) => ticket,
        };

        debug!("Content list cache miss, loading from storage");
        let contents = self.manager.get_many().await.inspect_err(|e| {
            warn!(error = %e, "Failed to load content list");
        })?;

        let snapshot = Arc::new(contents);
        let stored = self
            .slot
            .fill(ticket, Arc::clone(&snapshot), self.clock.now())
            .await;
        if stored {
            debug!(
                count = snapshot.len(),
                ttl_secs = self.slot.ttl().num_seconds(),
                "Content list cached"
            );
        } else {
            debug!("Content list invalidated during load, snapshot not cached");
        }

        Ok(snapshot)
    }

    /// [`read`](Self::read) that gives up as soon as `cancel` fires.
    ///
    /// A cancelled load never reaches the slot.
    pub async fn read_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<Content>>, ContentError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ContentError::Cancelled),
            result = self.read() => Ok(result?),
        }
    }

    /// The live snapshot, if any. Never loads.
    pub async fn peek(&self) -> Option<Arc<Vec<Content>>> {
        self.slot.peek(self.clock.now()).await
    }

    pub async fn invalidate(&self) {
        self.slot.invalidate().await;
        debug!("Content list cache invalidated");
    }

    /// Run `write` on its own task and invalidate once it succeeds.
    ///
    /// Dropping the returned future does not stop the write, so a write that
    /// reached storage always clears the slot.
    pub async fn invalidate_after<T, F>(self: &Arc<Self>, write: F) -> Result<T, ContentError>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ContentError>> + Send + 'static,
    {
        let cache = Arc::clone(self);
        let task = tokio::spawn(async move {
            let written = write.await?;
            cache.invalidate().await;
            Ok::<T, ContentError>(written)
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(ContentError::Cancelled),
        }
    }
}
