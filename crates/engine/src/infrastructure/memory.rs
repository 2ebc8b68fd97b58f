//! In-memory content storage.
//!
//! Optional artificial latency makes it behave like a slow remote database,
//! which is what the list cache exists to hide.

use std::time::Duration;

use async_trait::async_trait;
use catalog_domain::{Content, ContentId};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ContentRepo, RepoError};

/// Process-local content store. Records keep insertion order.
pub struct InMemoryContentRepo {
    contents: RwLock<Vec<Content>>,
    latency: Duration,
}

impl InMemoryContentRepo {
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Start with `contents` already stored.
    pub fn with_contents(mut self, contents: Vec<Content>) -> Self {
        self.contents = RwLock::new(contents);
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryContentRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepo for InMemoryContentRepo {
    async fn list_all(&self) -> Result<Vec<Content>, RepoError> {
        self.simulate_latency().await;
        Ok(self.contents.read().await.clone())
    }

    async fn get(&self, id: ContentId) -> Result<Option<Content>, RepoError> {
        self.simulate_latency().await;
        Ok(self
            .contents
            .read()
            .await
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn insert(&self, content: &Content) -> Result<(), RepoError> {
        self.simulate_latency().await;
        self.contents.write().await.push(content.clone());
        Ok(())
    }

    async fn replace(&self, content: &Content) -> Result<Option<Content>, RepoError> {
        self.simulate_latency().await;
        let mut guard = self.contents.write().await;
        match guard.iter_mut().find(|c| c.id() == content.id()) {
            Some(slot) => {
                *slot = content.clone();
                Ok(Some(content.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ContentId) -> Result<ContentId, RepoError> {
        self.simulate_latency().await;
        self.contents.write().await.retain(|c| c.id() != id);
        Ok(id)
    }
}

/// Store whose writes land immediately but are acknowledged late.
#[cfg(test)]
pub struct SlowAckContentRepo {
    inner: InMemoryContentRepo,
    ack_delay: Duration,
}

#[cfg(test)]
impl SlowAckContentRepo {
    pub fn new(inner: InMemoryContentRepo, ack_delay: Duration) -> Self {
        Self { inner, ack_delay }
    }
}

#[cfg(test)]
#[async_trait]
impl ContentRepo for SlowAckContentRepo {
    async fn list_all(&self) -> Result<Vec<Content>, RepoError> {
        self.inner.list_all().await
    }

    async fn get(&self, id: ContentId) -> Result<Option<Content>, RepoError> {
        self.inner.get(id).await
    }

    async fn insert(&self, content: &Content) -> Result<(), RepoError> {
        self.inner.insert(content).await?;
        tokio::time::sleep(self.ack_delay).await;
        Ok(())
    }

    async fn replace(&self, content: &Content) -> Result<Option<Content>, RepoError> {
        let replaced = self.inner.replace(content).await?;
        tokio::time::sleep(self.ack_delay).await;
        Ok(replaced)
    }

    async fn delete(&self, id: ContentId) -> Result<ContentId, RepoError> {
        let deleted = self.inner.delete(id).await?;
        tokio::time::sleep(self.ack_delay).await;
        Ok(deleted)
    }
}

/// A handful of records for local development.
pub fn sample_contents(now: DateTime<Utc>) -> Vec<Content> {
    let entry = |title: &str,
                 subtitle: &str,
                 description: &str,
                 slug: &str,
                 duration: u32,
                 starts_in_hours: i64,
                 genres: &[&str]| {
        let start = now + chrono::Duration::hours(starts_in_hours);
        Content::from_parts(
            ContentId::new(),
            title.to_string(),
            subtitle.to_string(),
            description.to_string(),
            format!("https://images.example.com/{slug}.jpg"),
            duration,
            start,
            start + chrono::Duration::minutes(i64::from(duration)),
            genres.iter().map(|g| g.to_string()).collect(),
        )
    };

    vec![
        entry(
            "Evening News",
            "Live",
            "The day's headlines, weather and sport.",
            "evening-news",
            45,
            1,
            &["News"],
        ),
        entry(
            "Harbour Lights",
            "Season 2, Episode 4",
            "A storm strands the ferry crew on the wrong side of the bay.",
            "harbour-lights",
            55,
            2,
            &["Drama", "Mystery"],
        ),
        entry(
            "Kitchen Rivals",
            "Semi-final",
            "Four cooks, one pantry, forty minutes.",
            "kitchen-rivals",
            40,
            3,
            &["Reality", "Cooking"],
        ),
        entry(
            "Night Orbit",
            "Feature",
            "A maintenance engineer is the last one awake on a research station.",
            "night-orbit",
            118,
            4,
            &["Sci-Fi", "Thriller"],
        ),
    ]
}
