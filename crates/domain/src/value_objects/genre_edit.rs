//! Genre add/remove rules
//!
//! Both checks are pure. Callers re-read the record right before validating and
//! persist the returned list themselves; nothing here holds a lock across that
//! read-validate-write sequence.

use crate::entities::Content;

/// Why a genre edit was rejected. Always fixable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenreEditError {
    #[error("Genres list is empty or does not exist")]
    EmptyInput,

    #[error("Cannot add repeated genres: {}", .0.join(", "))]
    DuplicateGenre(Vec<String>),

    #[error("Genres not found: {}", .0.join(", "))]
    GenreNotFound(Vec<String>),
}

/// Reject a missing or empty genre list.
///
/// Split out so request handlers can fail fast before touching storage.
pub fn require_genres(input: Option<&[String]>) -> Result<&[String], GenreEditError> {
    match input {
        Some(genres) if !genres.is_empty() => Ok(genres),
        _ => Err(GenreEditError::EmptyInput),
    }
}

/// Append `new_genres` to the record's genres.
///
/// The whole batch is rejected if any genre is already on the record. Repeats
/// within the batch itself are kept as given.
pub fn validate_add(
    existing: &Content,
    new_genres: Option<&[String]>,
) -> Result<Vec<String>, GenreEditError> {
    let new_genres = require_genres(new_genres)?;

    let mut repeated: Vec<String> = Vec::new();
    for genre in new_genres {
        if existing.has_genre(genre) && !repeated.contains(genre) {
            repeated.push(genre.clone());
        }
    }
    if !repeated.is_empty() {
        return Err(GenreEditError::DuplicateGenre(repeated));
    }

    let mut merged = existing.genres().to_vec();
    merged.extend_from_slice(new_genres);
    Ok(merged)
}

/// Drop every genre in `to_remove` from the record's genres.
///
/// Accepted as long as at least one of them is present; the others are ignored.
pub fn validate_remove(
    existing: &Content,
    to_remove: Option<&[String]>,
) -> Result<Vec<String>, GenreEditError> {
    let to_remove = require_genres(to_remove)?;

    if !to_remove.iter().any(|g| existing.has_genre(g)) {
        return Err(GenreEditError::GenreNotFound(to_remove.to_vec()));
    }

    Ok(existing
        .genres()
        .iter()
        .filter(|g| !to_remove.contains(g))
        .cloned()
        .collect())
}
