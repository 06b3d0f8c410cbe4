//! Core type definitions for studyhall

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(QuestionId)
    }
}

/// Unique identifier for an answer
///
/// Answer ids are unique across all questions, not just within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub u64);

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnswerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(AnswerId)
    }
}

/// Unique identifier for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub u64);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ReviewId)
    }
}

/// Monotonic id source owned by a manager
///
/// Ids start at 1 and are never reused, even after deletions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    /// Create a sequence whose first id is 1
    pub fn new() -> Self {
        Sequence { next: 1 }
    }

    /// Hand out the next id and advance
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut seq = Sequence::new();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
        assert_eq!(seq.next_id(), 3);
    }

    #[test]
    fn test_sequence_peek_does_not_advance() {
        let mut seq = Sequence::new();
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.peek(), 1);
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.peek(), 2);
    }

    #[test]
    fn test_question_id_parse() {
        assert_eq!("7".parse::<QuestionId>(), Ok(QuestionId(7)));
        assert_eq!(" 42 ".parse::<QuestionId>(), Ok(QuestionId(42)));
        assert!("abc".parse::<QuestionId>().is_err());
        assert!("-1".parse::<QuestionId>().is_err());
        assert!("".parse::<QuestionId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(QuestionId(3).to_string(), "3");
        assert_eq!(AnswerId(12).to_string(), "12");
        assert_eq!(ReviewId(1).to_string(), "1");
    }

    #[test]
    fn test_id_serialization() {
        let id = QuestionId(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");
        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
