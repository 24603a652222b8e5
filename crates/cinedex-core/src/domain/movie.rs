use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest title the `movies.title` column accepts.
pub const TITLE_MAX_CHARS: usize = 255;
pub const MIN_RELEASE_YEAR: i32 = 1800;
pub const MAX_RELEASE_YEAR: i32 = 2100;

/// Movie entity - one row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub release_year: i32,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    /// Create a new movie with generated ID and timestamps.
    pub fn new(draft: NewMovie, poster_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            release_year: draft.release_year,
            poster_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields onto this movie. Omitted fields are left untouched.
    pub fn apply(&mut self, changes: MovieChanges, poster_url: Option<String>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(release_year) = changes.release_year {
            self.release_year = release_year;
        }
        if poster_url.is_some() {
            self.poster_url = poster_url;
        }
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

/// Validated fields for a movie that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    title: String,
    release_year: i32,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, release_year: i32) -> Result<Self, DomainError> {
        let title = normalize_title(title.into())?;
        validate_release_year(release_year)?;
        Ok(Self {
            title,
            release_year,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_year(&self) -> i32 {
        self.release_year
    }
}

/// Partial update of a movie's own fields. The poster travels separately as an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub release_year: Option<i32>,
}

impl MovieChanges {
    /// Validate every provided field, normalizing the title in place.
    pub fn validated(self) -> Result<Self, DomainError> {
        let title = self.title.map(normalize_title).transpose()?;
        if let Some(year) = self.release_year {
            validate_release_year(year)?;
        }
        Ok(Self {
            title,
            release_year: self.release_year,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_year.is_none()
    }
}

fn normalize_title(title: String) -> Result<String, DomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::validation(format!(
            "Title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_release_year(year: i32) -> Result<(), DomainError> {
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
        return Err(DomainError::validation(format!(
            "Release year must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"
        )));
    }
    Ok(())
}
