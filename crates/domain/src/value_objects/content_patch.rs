//! Partial-update payload and field merge rules
//!
//! A patch only overrides the fields it actually carries. Anything left unset
//! (or blank, for text) keeps the value of the existing record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Content;
use crate::error::DomainError;

/// Field-by-field partial update of a [`Content`].
///
/// Also used as the creation payload, in which case every field except
/// `genres` must be present (see [`Content::create`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub duration: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Non-empty replaces the whole list; empty or unset keeps it.
    pub genres: Option<Vec<String>>,
}

impl ContentPatch {
    /// Patch that only replaces the genre list.
    pub fn genres(genres: Vec<String>) -> Self {
        Self {
            genres: Some(genres),
            ..Self::default()
        }
    }

    /// Reject values no record may hold, before anything is merged or stored.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.duration == Some(0) {
            return Err(DomainError::validation("duration must be positive"));
        }
        Ok(())
    }

    /// Compute the record that results from applying this patch to `existing`.
    ///
    /// The identifier is always carried over from `existing`.
    pub fn merge(&self, existing: &Content) -> Content {
        let genres = match &self.genres {
            Some(genres) if !genres.is_empty() => genres.clone(),
            _ => existing.genres().to_vec(),
        };

        Content::from_parts(
            existing.id(),
            pick_text(self.title.as_deref(), existing.title()),
            pick_text(self.subtitle.as_deref(), existing.subtitle()),
            pick_text(self.description.as_deref(), existing.description()),
            pick_text(self.image_url.as_deref(), existing.image_url()),
            self.duration.unwrap_or(existing.duration()),
            self.start_time.unwrap_or(existing.start_time()),
            self.end_time.unwrap_or(existing.end_time()),
            genres,
        )
    }
}

/// Free-function form of [`ContentPatch::merge`].
pub fn merge(existing: &Content, patch: &ContentPatch) -> Content {
    patch.merge(existing)
}

fn pick_text(patch: Option<&str>, existing: &str) -> String {
    match patch {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => existing.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ContentId;
    use chrono::TimeZone;

    fn existing() -> Content {
        Content::from_parts(
            ContentId::new(),
            "Original title".to_string(),
            "Original subtitle".to_string(),
            "Original description".to_string(),
            "https://img.example/original.png".to_string(),
            45,
            Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 18, 45, 0).unwrap(),
            vec!["news".to_string(), "live".to_string()],
        )
    }

    fn full_patch() -> ContentPatch {
        ContentPatch {
            title: Some("New title".to_string()),
            subtitle: Some("New subtitle".to_string()),
            description: Some("New description".to_string()),
            image_url: Some("https://img.example/new.png".to_string()),
            duration: Some(120),
            start_time: Some(Utc.with_ymd_and_hms(2024, 4, 2, 21, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 4, 2, 23, 0, 0).unwrap()),
            genres: Some(vec!["drama".to_string()]),
        }
    }

    #[test]
    fn empty_patch_is_identity() {
        let content = existing();
        assert_eq!(ContentPatch::default().merge(&content), content);
    }

    #[test]
    fn full_patch_overrides_everything_but_id() {
        let content = existing();
        let patch = full_patch();
        let merged = patch.merge(&content);

        assert_eq!(merged.id(), content.id());
        assert_eq!(merged.title(), "New title");
        assert_eq!(merged.subtitle(), "New subtitle");
        assert_eq!(merged.description(), "New description");
        assert_eq!(merged.image_url(), "https://img.example/new.png");
        assert_eq!(merged.duration(), 120);
        assert_eq!(Some(merged.start_time()), patch.start_time);
        assert_eq!(Some(merged.end_time()), patch.end_time);
        assert_eq!(merged.genres(), ["drama".to_string()]);
    }

    #[test]
    fn each_unset_field_keeps_original() {
        let content = existing();

        let merged = ContentPatch { title: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.title(), content.title());
        assert_eq!(merged.subtitle(), "New subtitle");

        let merged = ContentPatch { subtitle: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.subtitle(), content.subtitle());

        let merged = ContentPatch { description: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.description(), content.description());

        let merged = ContentPatch { image_url: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.image_url(), content.image_url());

        let merged = ContentPatch { duration: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.duration(), content.duration());

        let merged = ContentPatch { start_time: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.start_time(), content.start_time());
        assert_eq!(merged.duration(), 120);

        let merged = ContentPatch { end_time: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.end_time(), content.end_time());
    }

    #[test]
    fn blank_text_counts_as_unset() {
        let content = existing();
        let patch = ContentPatch {
            title: Some(String::new()),
            description: Some("  ".to_string()),
            ..ContentPatch::default()
        };
        let merged = patch.merge(&content);
        assert_eq!(merged.title(), content.title());
        assert_eq!(merged.description(), content.description());
    }

    #[test]
    fn non_empty_genres_replace_in_order() {
        let content = existing();
        let patch = ContentPatch::genres(vec!["b".to_string(), "a".to_string(), "news".to_string()]);
        let merged = merge(&content, &patch);
        assert_eq!(
            merged.genres(),
            ["b".to_string(), "a".to_string(), "news".to_string()]
        );
    }

    #[test]
    fn empty_genres_keep_original() {
        let content = existing();
        let merged = ContentPatch::genres(Vec::new()).merge(&content);
        assert_eq!(merged.genres(), content.genres());

        let merged = ContentPatch { genres: None, ..full_patch() }.merge(&content);
        assert_eq!(merged.genres(), content.genres());
    }

    #[test]
    fn merge_leaves_existing_untouched() {
        let content = existing();
        let before = content.clone();
        let _ = full_patch().merge(&content);
        assert_eq!(content, before);
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let patch = ContentPatch {
            duration: Some(0),
            ..ContentPatch::default()
        };
        assert!(patch.validate().is_err());
        assert!(ContentPatch::default().validate().is_ok());
        assert!(full_patch().validate().is_ok());
    }

    #[test]
    fn deserializes_partial_json() {
        let patch: ContentPatch =
            serde_json::from_str(r#"{"title":"Only title","imageUrl":null}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Only title"));
        assert_eq!(patch.image_url, None);
        assert_eq!(patch.genres, None);
        assert_eq!(patch.duration, None);
    }
}
