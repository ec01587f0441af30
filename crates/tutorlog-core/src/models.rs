//! Core data models for tutorlog.
//!
//! These types are shared across all tutorlog crates and represent the two
//! domain entities: learners and the progress notes attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::DEFAULT_LANGUAGE;
use crate::error::{Error, Result};

// =============================================================================
// LEARNER TYPES
// =============================================================================

/// A tracked individual studying a language.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub name: String,
    pub language: String,
    pub level: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}

/// Learner row for list views, with its note count precomputed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LearnerSummary {
    pub id: Uuid,
    pub name: String,
    pub language: String,
    pub level: Option<String>,
    pub notes_count: i64,
    pub created_at_utc: DateTime<Utc>,
}

/// A timestamped free-text progress entry attached to a learner.
///
/// Notes are immutable after creation: they are only ever inserted and
/// deleted, so `created_at_utc` reflects creation order exactly.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub content: String,
    /// Free-form comma-separated tags, as entered.
    pub tags: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request for creating a new learner.
#[derive(Debug, Clone, Default)]
pub struct CreateLearnerRequest {
    pub name: String,
    pub language: Option<String>,
    pub level: Option<String>,
}

impl CreateLearnerRequest {
    /// Trim all fields and apply defaults.
    ///
    /// Fails with `Error::Validation` when the name is blank after trimming.
    /// A blank language falls back to [`DEFAULT_LANGUAGE`]; a blank level
    /// becomes absent.
    pub fn normalize(self) -> Result<Self> {
        let name = require_non_blank(&self.name, "name")?;
        Ok(Self {
            name,
            language: Some(
                normalize_optional(self.language.as_deref().unwrap_or(""))
                    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            ),
            level: normalize_optional(self.level.as_deref().unwrap_or("")),
        })
    }

    /// Language with the default applied. Only meaningful after `normalize`.
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// Request for updating a learner's mutable fields in place.
#[derive(Debug, Clone, Default)]
pub struct UpdateLearnerRequest {
    pub name: String,
    pub language: Option<String>,
    pub level: Option<String>,
}

impl UpdateLearnerRequest {
    /// Same trimming and defaulting rules as learner creation.
    pub fn normalize(self) -> Result<Self> {
        let req = CreateLearnerRequest {
            name: self.name,
            language: self.language,
            level: self.level,
        }
        .normalize()?;
        Ok(Self {
            name: req.name,
            language: req.language,
            level: req.level,
        })
    }
}

/// Request for creating a new note under an existing learner.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub learner_id: Uuid,
    pub content: String,
    pub tags: Option<String>,
}

impl CreateNoteRequest {
    /// Trim content and tags; blank tags become absent.
    ///
    /// Fails with `Error::Validation` when content is blank after trimming.
    pub fn normalize(self) -> Result<Self> {
        let content = require_non_blank(&self.content, "content")?;
        Ok(Self {
            learner_id: self.learner_id,
            content,
            tags: normalize_optional(self.tags.as_deref().unwrap_or("")),
        })
    }
}

/// Filters for listing learners.
///
/// Both filters match case-insensitively on substring containment. When both
/// are supplied, only the language filter is applied; the list endpoint has
/// always behaved this way and callers depend on it.
#[derive(Debug, Clone, Default)]
pub struct ListLearnersRequest {
    pub name_contains: Option<String>,
    pub language_contains: Option<String>,
}

impl ListLearnersRequest {
    /// The single filter that is effectively applied, if any.
    ///
    /// Language wins when both are present.
    pub fn effective_filter(&self) -> Option<LearnerFilter<'_>> {
        if let Some(lang) = non_blank(self.language_contains.as_deref()) {
            return Some(LearnerFilter::Language(lang));
        }
        non_blank(self.name_contains.as_deref()).map(LearnerFilter::Name)
    }
}

/// The filter column and pattern resolved from a [`ListLearnersRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnerFilter<'a> {
    Name(&'a str),
    Language(&'a str),
}

/// Sort order for a learner's notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteOrder {
    /// Oldest first (creation order) — used by the CSV export.
    CreatedAsc,
    /// Newest first — used by the learner detail page.
    #[default]
    CreatedDesc,
}

// =============================================================================
// FIELD NORMALIZATION
// =============================================================================

/// Trim the input; a blank result is an error naming the field.
pub fn require_non_blank(input: &str, field: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim the input; a blank result becomes `None`.
pub fn normalize_optional(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}
