//! Review manager for the course review feed

use tracing::debug;

use super::model::Review;
use crate::error::{Result, StudyhallError};
use crate::types::{ReviewId, Sequence};
use crate::validate::ContentPolicy;

/// Manager for submitted reviews
#[derive(Debug, Clone)]
pub struct ReviewManager {
    /// All reviews in submission order
    reviews: Vec<Review>,
    /// Id source for reviews
    review_ids: Sequence,
    /// Rules for review text
    policy: ContentPolicy,
}

impl ReviewManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self {
            reviews: Vec::new(),
            review_ids: Sequence::new(),
            policy: ContentPolicy::new(),
        }
    }

    /// Create a manager with a custom content policy
    pub fn with_policy(policy: ContentPolicy) -> Self {
        Self {
            reviews: Vec::new(),
            review_ids: Sequence::new(),
            policy,
        }
    }

    /// Submit a new review
    pub fn submit(&mut self, content: &str) -> Result<ReviewId> {
        self.policy.check("Review content", content)?;
        let id = ReviewId(self.review_ids.next_id());
        self.reviews.push(Review::new(id, content));
        debug!("Submitted review {}", id);
        Ok(id)
    }

    /// Overwrite a review's content; the first edit plants the lineage marker
    pub fn update(&mut self, id: ReviewId, new_content: &str) -> Result<()> {
        self.policy.check("Review update", new_content)?;
        let review = self.get_mut(id).ok_or(StudyhallError::ReviewNotFound(id))?;
        review.revise(new_content);
        debug!("Updated review {}", id);
        Ok(())
    }

    /// All reviews in submission order
    pub fn all(&self) -> &[Review] {
        &self.reviews
    }

    /// Look up a review by id
    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id() == id)
    }

    fn get_mut(&mut self, id: ReviewId) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|review| review.id() == id)
    }

    /// Number of stored reviews
    pub fn count(&self) -> usize {
        self.reviews.len()
    }

    /// Whether no reviews were stored yet
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

impl Default for ReviewManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submit_assigns_sequential_ids() {
        let mut manager = ReviewManager::new();
        assert_eq!(manager.submit("first").unwrap(), ReviewId(1));
        assert_eq!(manager.submit("second").unwrap(), ReviewId(2));
        assert_eq!(manager.count(), 2);
    }

    #[test]
    fn test_submit_blank_rejected() {
        let mut manager = ReviewManager::new();
        let err = manager.submit(" \t ").unwrap_err();
        assert_eq!(
            err,
            StudyhallError::Validation("Review content cannot be empty".to_string())
        );
        assert!(manager.is_empty());
    }

    #[test]
    fn test_duplicate_content_is_allowed() {
        let mut manager = ReviewManager::new();
        manager.submit("Great course").unwrap();
        manager.submit("Great course").unwrap();
        assert_eq!(manager.count(), 2);
    }

    #[test]
    fn test_update_plants_marker_once() {
        let mut manager = ReviewManager::new();
        let id = manager.submit("v1").unwrap();
        manager.update(id, "v2").unwrap();
        manager.update(id, "v3").unwrap();

        let review = manager.get(id).unwrap();
        assert_eq!(review.content(), "v3");
        assert_eq!(review.original_review_id(), Some(id));
    }

    #[test]
    fn test_update_unknown_review() {
        let mut manager = ReviewManager::new();
        let err = manager.update(ReviewId(5), "text").unwrap_err();
        assert_eq!(err, StudyhallError::ReviewNotFound(ReviewId(5)));
    }

    #[test]
    fn test_update_blank_rejected() {
        let mut manager = ReviewManager::new();
        let id = manager.submit("v1").unwrap();
        let err = manager.update(id, "").unwrap_err();
        assert_eq!(
            err,
            StudyhallError::Validation("Review update cannot be empty".to_string())
        );
        // content and marker untouched
        let review = manager.get(id).unwrap();
        assert_eq!(review.content(), "v1");
        assert!(!review.is_revised());
    }

    #[test]
    fn test_all_preserves_submission_order() {
        let mut manager = ReviewManager::new();
        let r1 = manager.submit("first").unwrap();
        let r2 = manager.submit("second").unwrap();

        let ids: Vec<ReviewId> = manager.all().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![r1, r2]);
    }

    #[test]
    fn test_with_policy() {
        let mut manager = ReviewManager::with_policy(ContentPolicy::with_max_length(3));
        assert!(manager.submit("ok!").is_ok());
        assert!(manager.submit("too long").is_err());
    }
}
