//! Question and answer data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{AnswerId, QuestionId};

/// Lifecycle status of a question
///
/// The only transition is Unresolved to Resolved, made when an answer is
/// accepted. A resolved question never becomes unresolved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStatus {
    /// No accepted answer yet
    Unresolved,
    /// At least one accepted answer exists
    Resolved,
}

impl QuestionStatus {
    /// Check if status is unresolved
    pub fn is_unresolved(&self) -> bool {
        matches!(self, QuestionStatus::Unresolved)
    }

    /// Check if status is resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, QuestionStatus::Resolved)
    }
}

impl Default for QuestionStatus {
    fn default() -> Self {
        QuestionStatus::Unresolved
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionStatus::Unresolved => write!(f, "Unresolved"),
            QuestionStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

/// An answer attached to a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Unique answer identifier
    id: AnswerId,
    /// Answer text, stored as supplied
    text: String,
    /// Whether this answer was accepted
    accepted: bool,
    /// When the answer was submitted
    created_at: DateTime<Utc>,
}

impl Answer {
    pub(crate) fn new(id: AnswerId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            accepted: false,
            created_at: Utc::now(),
        }
    }

    /// The answer identifier
    pub fn id(&self) -> AnswerId {
        self.id
    }

    /// The answer text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this answer was accepted
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// When the answer was submitted
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Idempotent; acceptance is never withdrawn
    pub(crate) fn mark_accepted(&mut self) {
        self.accepted = true;
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Answer {}: {}", self.id, self.text)?;
        if self.accepted {
            write!(f, " (Accepted)")?;
        }
        Ok(())
    }
}

/// A submitted question and its answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    id: QuestionId,
    /// Question text, stored as supplied
    text: String,
    /// Lifecycle status
    status: QuestionStatus,
    /// Answers in submission order
    answers: Vec<Answer>,
    /// When the question was submitted
    created_at: DateTime<Utc>,
    /// When the question last changed
    updated_at: DateTime<Utc>,
}

impl Question {
    pub(crate) fn new(id: QuestionId, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            text: text.into(),
            status: QuestionStatus::Unresolved,
            answers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The question identifier
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// The question text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current lifecycle status
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    /// Answers in submission order
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Look up an answer of this question
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id() == id)
    }

    /// When the question was submitted
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the question last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn answer_mut(&mut self, id: AnswerId) -> Option<&mut Answer> {
        self.answers.iter_mut().find(|answer| answer.id() == id)
    }

    /// Overwrite the text in place; no history is kept
    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    pub(crate) fn push_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
        self.touch();
    }

    /// One-way; never called in the other direction
    pub(crate) fn resolve(&mut self) {
        self.status = QuestionStatus::Resolved;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {}: {} [{}]", self.id, self.text, self.status)
    }
}
