//! Listing filter applied on top of the full catalog snapshot.

use serde::Deserialize;

use crate::entities::Content;

/// Title/genre criteria for catalog listings.
///
/// Blank criteria are ignored. With no criteria every record matches; otherwise a
/// record matches when its title contains `title` OR its genres include `genre`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
}

impl ContentFilter {
    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.genre().is_none()
    }

    pub fn matches(&self, content: &Content) -> bool {
        if self.is_empty() {
            return true;
        }
        let title_hit = self
            .title()
            .is_some_and(|title| content.title().contains(title));
        let genre_hit = self.genre().is_some_and(|genre| content.has_genre(genre));
        title_hit || genre_hit
    }

    /// Matching records, in snapshot order.
    pub fn apply(&self, contents: &[Content]) -> Vec<Content> {
        contents
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.trim().is_empty())
    }
}
