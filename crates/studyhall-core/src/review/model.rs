//! Review data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ReviewId;

/// A submitted course review
///
/// Edits overwrite the content destructively. The only versioning signal is
/// `original_review_id`, set to the review's own id by the first edit and
/// never changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review identifier
    id: ReviewId,
    /// Review text, stored as supplied
    content: String,
    /// Lineage marker, present once the review was edited
    original_review_id: Option<ReviewId>,
    /// When the review was submitted
    created_at: DateTime<Utc>,
    /// When the review last changed
    updated_at: DateTime<Utc>,
}

impl Review {
    pub(crate) fn new(id: ReviewId, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            content: content.into(),
            original_review_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The review identifier
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// The review text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The lineage marker; None means the review was never edited
    pub fn original_review_id(&self) -> Option<ReviewId> {
        self.original_review_id
    }

    /// Whether the review was edited at least once
    pub fn is_revised(&self) -> bool {
        self.original_review_id.is_some()
    }

    /// When the review was submitted
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the review last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite the content; the first edit plants the lineage marker
    pub(crate) fn revise(&mut self, new_content: impl Into<String>) {
        if self.original_review_id.is_none() {
            self.original_review_id = Some(self.id);
        }
        self.content = new_content.into();
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Review {}: {}", self.id, self.content)?;
        if let Some(original) = self.original_review_id {
            write!(f, " (Updated from Review {})", original)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_review_has_no_marker() {
        let review = Review::new(ReviewId(1), "Great course");
        assert_eq!(review.original_review_id(), None);
        assert!(!review.is_revised());
    }

    #[test]
    fn test_first_revision_plants_marker() {
        let mut review = Review::new(ReviewId(4), "Great course");
        review.revise("Good course");
        assert_eq!(review.content(), "Good course");
        assert_eq!(review.original_review_id(), Some(ReviewId(4)));
    }

    #[test]
    fn test_marker_survives_later_revisions() {
        let mut review = Review::new(ReviewId(4), "v1");
        review.revise("v2");
        review.revise("v3");
        assert_eq!(review.content(), "v3");
        assert_eq!(review.original_review_id(), Some(ReviewId(4)));
    }

    #[test]
    fn test_display_shows_lineage() {
        let mut review = Review::new(ReviewId(2), "Solid");
        assert_eq!(review.to_string(), "Review 2: Solid");
        review.revise("Solid enough");
        assert_eq!(
            review.to_string(),
            "Review 2: Solid enough (Updated from Review 2)"
        );
    }

    #[test]
    fn test_review_serialization() {
        let mut review = Review::new(ReviewId(1), "v1");
        review.revise("v2");

        let json = serde_json::to_string(&review).unwrap();
        let back: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content(), "v2");
        assert_eq!(back.original_review_id(), Some(ReviewId(1)));
    }
}
