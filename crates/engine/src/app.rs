//! Application state and composition.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::{ClockPort, ContentRepo};
use crate::repositories::ContentManager;
use crate::use_cases::content::{
    AddGenres, ContentCrud, ContentListCache, ContentUseCases, RemoveGenres,
};

/// Main application state.
///
/// Holds the use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    /// Cancelled when the server starts shutting down; aborts in-flight list loads.
    pub shutdown: CancellationToken,
}

/// Container for all use cases.
pub struct UseCases {
    pub content: ContentUseCases,
}

impl App {
    /// Wire the content store, clock and cache lifetime into a ready application.
    pub fn new(
        content_repo: Arc<dyn ContentRepo>,
        clock: Arc<dyn ClockPort>,
        cache_ttl: chrono::Duration,
    ) -> Self {
        let shutdown = CancellationToken::new();

        let content = Arc::new(ContentManager::new(content_repo));
        let cache = Arc::new(ContentListCache::new(content.clone(), clock, cache_ttl));

        let content_use_cases = ContentUseCases::new(
            Arc::new(ContentCrud::new(
                content.clone(),
                cache.clone(),
                shutdown.clone(),
            )),
            Arc::new(AddGenres::new(content.clone(), cache.clone())),
            Arc::new(RemoveGenres::new(content, cache.clone())),
            cache,
        );

        Self {
            use_cases: UseCases {
                content: content_use_cases,
            },
            shutdown,
        }
    }
}
