//! Content entity - a catalog entry (show, film, broadcast)
//!
//! A `Content` is never edited in place. Every change produces a new value that
//! replaces the stored one wholesale, so readers holding an older snapshot keep
//! seeing a consistent record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_domain::ContentId;

use crate::error::DomainError;
use crate::value_objects::ContentPatch;

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    id: ContentId,
    title: String,
    subtitle: String,
    description: String,
    image_url: String,
    /// Running time in minutes
    duration: u32,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    /// Ordered by first insertion
    genres: Vec<String>,
}

impl Content {
    /// Build a record from a creation payload.
    ///
    /// Every field except `genres` is required. Missing genres default to an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first missing or invalid field.
    pub fn create(id: ContentId, input: &ContentPatch) -> Result<Self, DomainError> {
        let title = required_text(input.title.as_deref(), "title")?;
        let subtitle = required_text(input.subtitle.as_deref(), "subtitle")?;
        let description = required_text(input.description.as_deref(), "description")?;
        let image_url = required_text(input.image_url.as_deref(), "imageUrl")?;
        let duration = input
            .duration
            .ok_or_else(|| DomainError::validation("duration is required"))?;
        if duration == 0 {
            return Err(DomainError::validation("duration must be positive"));
        }
        let start_time = input
            .start_time
            .ok_or_else(|| DomainError::validation("startTime is required"))?;
        let end_time = input
            .end_time
            .ok_or_else(|| DomainError::validation("endTime is required"))?;

        Ok(Self {
            id,
            title,
            subtitle,
            description,
            image_url,
            duration,
            start_time,
            end_time,
            genres: input.genres.clone().unwrap_or_default(),
        })
    }

    /// Reconstruct a record from already-validated parts (storage, merges).
    pub fn from_parts(
        id: ContentId,
        title: String,
        subtitle: String,
        description: String,
        image_url: String,
        duration: u32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        genres: Vec<String>,
    ) -> Self {
        Self {
            id,
            title,
            subtitle,
            description,
            image_url,
            duration,
            start_time,
            end_time,
            genres,
        }
    }

    /// Same record with its genre list swapped out.
    pub fn with_genres(self, genres: Vec<String>) -> Self {
        Self { genres, ..self }
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        Some(_) => Err(DomainError::validation(format!("{field} cannot be empty"))),
        None => Err(DomainError::validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_input() -> ContentPatch {
        ContentPatch {
            title: Some("Title".to_string()),
            subtitle: Some("Subtitle".to_string()),
            description: Some("Description".to_string()),
            image_url: Some("https://img.example/1.png".to_string()),
            duration: Some(90),
            start_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 21, 30, 0).unwrap()),
            genres: Some(vec!["drama".to_string()]),
        }
    }

    #[test]
    fn create_copies_every_field() {
        let id = ContentId::new();
        let input = full_input();
        let content = Content::create(id, &input).unwrap();

        assert_eq!(content.id(), id);
        assert_eq!(content.title(), "Title");
        assert_eq!(content.subtitle(), "Subtitle");
        assert_eq!(content.description(), "Description");
        assert_eq!(content.image_url(), "https://img.example/1.png");
        assert_eq!(content.duration(), 90);
        assert_eq!(Some(content.start_time()), input.start_time);
        assert_eq!(Some(content.end_time()), input.end_time);
        assert_eq!(content.genres(), ["drama".to_string()]);
    }

    #[test]
    fn create_without_genres_starts_empty() {
        let input = ContentPatch {
            genres: None,
            ..full_input()
        };
        let content = Content::create(ContentId::new(), &input).unwrap();
        assert!(content.genres().is_empty());
    }

    #[test]
    fn create_rejects_missing_title() {
        let input = ContentPatch {
            title: None,
            ..full_input()
        };
        let err = Content::create(ContentId::new(), &input).unwrap_err();
        assert_eq!(err, DomainError::validation("title is required"));
    }

    #[test]
    fn create_rejects_blank_subtitle() {
        let input = ContentPatch {
            subtitle: Some("   ".to_string()),
            ..full_input()
        };
        let err = Content::create(ContentId::new(), &input).unwrap_err();
        assert_eq!(err, DomainError::validation("subtitle cannot be empty"));
    }

    #[test]
    fn create_rejects_missing_description_and_image() {
        let no_description = ContentPatch {
            description: None,
            ..full_input()
        };
        assert!(Content::create(ContentId::new(), &no_description).is_err());

        let no_image = ContentPatch {
            image_url: None,
            ..full_input()
        };
        assert!(Content::create(ContentId::new(), &no_image).is_err());
    }

    #[test]
    fn create_rejects_missing_or_zero_duration() {
        let missing = ContentPatch {
            duration: None,
            ..full_input()
        };
        assert_eq!(
            Content::create(ContentId::new(), &missing).unwrap_err(),
            DomainError::validation("duration is required")
        );

        let zero = ContentPatch {
            duration: Some(0),
            ..full_input()
        };
        assert_eq!(
            Content::create(ContentId::new(), &zero).unwrap_err(),
            DomainError::validation("duration must be positive")
        );
    }

    #[test]
    fn create_rejects_missing_times() {
        let no_start = ContentPatch {
            start_time: None,
            ..full_input()
        };
        assert!(Content::create(ContentId::new(), &no_start).is_err());

        let no_end = ContentPatch {
            end_time: None,
            ..full_input()
        };
        assert!(Content::create(ContentId::new(), &no_end).is_err());
    }

    #[test]
    fn with_genres_keeps_other_fields() {
        let original = Content::create(ContentId::new(), &full_input()).unwrap();
        let updated = original.clone().with_genres(vec!["comedy".to_string()]);

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.title(), original.title());
        assert_eq!(updated.genres(), ["comedy".to_string()]);
        assert_eq!(original.genres(), ["drama".to_string()]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let content = Content::create(ContentId::new(), &full_input()).unwrap();
        let json = serde_json::to_value(&content).unwrap();

        assert!(json.get("imageUrl").is_some());
        assert!(json.get("startTime").is_some());
        assert!(json.get("endTime").is_some());
        assert_eq!(json["genres"][0], "drama");

        let back: Content = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }
}
