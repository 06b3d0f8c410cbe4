//! Question manager for submission, updates, answers and acceptance

use tracing::debug;

use super::model::{Answer, Question};
use crate::error::{Result, StudyhallError};
use crate::types::{AnswerId, QuestionId, Sequence};
use crate::validate::ContentPolicy;

/// Outcome of a question submission
///
/// A duplicate is a warning, not an error: nothing is stored, but the caller
/// learns which existing question matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Stored under a fresh id
    Submitted(QuestionId),
    /// Text matched an existing question case-insensitively; nothing stored
    Duplicate(QuestionId),
}

impl Submission {
    /// Whether the submission was dropped as a duplicate
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Submission::Duplicate(_))
    }

    /// Id of the stored question, or of the matched one for duplicates
    pub fn question_id(&self) -> QuestionId {
        match *self {
            Submission::Submitted(id) | Submission::Duplicate(id) => id,
        }
    }
}

/// Manager for submitted questions and their answers
#[derive(Debug, Clone)]
pub struct QuestionManager {
    /// All questions in submission order
    questions: Vec<Question>,
    /// Id source for questions
    question_ids: Sequence,
    /// Id source shared by all answers across questions
    answer_ids: Sequence,
    /// Rules for question and answer text
    policy: ContentPolicy,
}

impl QuestionManager {
    /// Create a manager with default settings
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            question_ids: Sequence::new(),
            answer_ids: Sequence::new(),
            policy: ContentPolicy::new(),
        }
    }

    /// Create a manager with a custom content policy
    pub fn with_policy(policy: ContentPolicy) -> Self {
        Self {
            questions: Vec::new(),
            question_ids: Sequence::new(),
            answer_ids: Sequence::new(),
            policy,
        }
    }

    /// Submit new question text
    pub fn submit(&mut self, text: &str) -> Result<Submission> {
        self.policy.check("Question", text)?;
        if let Some(existing) = self.find_by_text(text) {
            let id = existing.id();
            debug!("Duplicate question text matched question {}", id);
            return Ok(Submission::Duplicate(id));
        }

        let id = QuestionId(self.question_ids.next_id());
        self.questions.push(Question::new(id, text));
        debug!("Submitted question {}", id);
        Ok(Submission::Submitted(id))
    }

    /// Overwrite a question's text
    pub fn update(&mut self, id: QuestionId, new_text: &str) -> Result<()> {
        self.policy.check("Updated question text", new_text)?;
        let question = self
            .get_mut(id)
            .ok_or(StudyhallError::QuestionNotFound(id))?;
        question.set_text(new_text);
        debug!("Updated question {}", id);
        Ok(())
    }

    /// Append an answer to a question
    pub fn submit_answer(&mut self, question_id: QuestionId, text: &str) -> Result<AnswerId> {
        self.policy.check("Answer", text)?;
        // ids are only drawn for answers that actually get stored
        if self.get(question_id).is_none() {
            return Err(StudyhallError::QuestionNotFound(question_id));
        }

        let id = AnswerId(self.answer_ids.next_id());
        let question = self
            .get_mut(question_id)
            .ok_or(StudyhallError::QuestionNotFound(question_id))?;
        question.push_answer(Answer::new(id, text));
        debug!("Answer {} added to question {}", id, question_id);
        Ok(id)
    }

    /// Mark an answer accepted and resolve its question
    ///
    /// An answer belonging to a different question is reported distinctly
    /// from an unknown question. Earlier accepted answers keep their flag.
    pub fn accept_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) -> Result<()> {
        let question = self
            .get_mut(question_id)
            .ok_or(StudyhallError::QuestionNotFound(question_id))?;
        let answer = question
            .answer_mut(answer_id)
            .ok_or(StudyhallError::AnswerNotValid {
                question: question_id,
                answer: answer_id,
            })?;
        answer.mark_accepted();
        question.resolve();
        debug!("Accepted answer {} on question {}", answer_id, question_id);
        Ok(())
    }

    /// Questions still waiting for an accepted answer, in submission order
    pub fn unresolved(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.status().is_unresolved())
            .collect()
    }

    /// All questions in submission order
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    fn get_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        self.questions
            .iter_mut()
            .find(|question| question.id() == id)
    }

    fn find_by_text(&self, text: &str) -> Option<&Question> {
        let needle = text.to_lowercase();
        self.questions
            .iter()
            .find(|question| question.text().to_lowercase() == needle)
    }

    /// Number of stored questions
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Whether no questions were stored yet
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manager_with_question() -> (QuestionManager, QuestionId) {
        let mut manager = QuestionManager::new();
        let id = match manager.submit("Why is the sky blue?").unwrap() {
            Submission::Submitted(id) => id,
            Submission::Duplicate(id) => id,
        };
        (manager, id)
    }

    #[test]
    fn test_submit_assigns_sequential_ids() {
        let mut manager = QuestionManager::new();
        assert_eq!(
            manager.submit("first").unwrap(),
            Submission::Submitted(QuestionId(1))
        );
        assert_eq!(
            manager.submit("second").unwrap(),
            Submission::Submitted(QuestionId(2))
        );
        assert_eq!(manager.count(), 2);
    }

    #[test]
    fn test_submit_blank_rejected() {
        let mut manager = QuestionManager::new();
        let err = manager.submit("   ").unwrap_err();
        assert_eq!(
            err,
            StudyhallError::Validation("Question cannot be empty".to_string())
        );
        assert!(manager.is_empty());
    }

    #[test]
    fn test_submit_duplicate_ignores_case() {
        let (mut manager, id) = manager_with_question();
        let outcome = manager.submit("WHY IS THE SKY BLUE?").unwrap();
        assert_eq!(outcome, Submission::Duplicate(id));
        assert!(outcome.is_duplicate());
        assert_eq!(outcome.question_id(), id);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_submit_near_duplicate_is_stored() {
        let (mut manager, _) = manager_with_question();
        // whitespace differs, so this is a distinct question
        let outcome = manager.submit("Why is the sky blue? ").unwrap();
        assert!(!outcome.is_duplicate());
        assert_eq!(manager.count(), 2);
    }

    #[test]
    fn test_duplicate_does_not_burn_an_id() {
        let (mut manager, _) = manager_with_question();
        manager.submit("why is the sky blue?").unwrap();
        assert_eq!(
            manager.submit("fresh").unwrap(),
            Submission::Submitted(QuestionId(2))
        );
    }

    #[test]
    fn test_update_question() {
        let (mut manager, id) = manager_with_question();
        manager.update(id, "Why is the sky blue at noon?").unwrap();
        assert_eq!(
            manager.get(id).unwrap().text(),
            "Why is the sky blue at noon?"
        );
    }

    #[test]
    fn test_update_unknown_question() {
        let mut manager = QuestionManager::new();
        let err = manager.update(QuestionId(9), "text").unwrap_err();
        assert_eq!(err, StudyhallError::QuestionNotFound(QuestionId(9)));
    }

    #[test]
    fn test_update_blank_rejected_before_lookup() {
        let mut manager = QuestionManager::new();
        let err = manager.update(QuestionId(9), "  ").unwrap_err();
        assert_eq!(
            err,
            StudyhallError::Validation("Updated question text cannot be empty".to_string())
        );
    }

    #[test]
    fn test_submit_answer() {
        let (mut manager, id) = manager_with_question();
        let a1 = manager.submit_answer(id, "Rayleigh scattering").unwrap();
        let a2 = manager.submit_answer(id, "Physics").unwrap();
        assert_eq!(a1, AnswerId(1));
        assert_eq!(a2, AnswerId(2));

        let question = manager.get(id).unwrap();
        assert_eq!(question.answers().len(), 2);
        assert!(question.status().is_unresolved());
    }

    #[test]
    fn test_answer_ids_span_questions() {
        let mut manager = QuestionManager::new();
        let q1 = manager.submit("first").unwrap().question_id();
        let q2 = manager.submit("second").unwrap().question_id();

        assert_eq!(manager.submit_answer(q1, "a").unwrap(), AnswerId(1));
        assert_eq!(manager.submit_answer(q2, "b").unwrap(), AnswerId(2));
        assert_eq!(manager.submit_answer(q1, "c").unwrap(), AnswerId(3));
    }

    #[test]
    fn test_separate_managers_number_independently() {
        let mut first = QuestionManager::new();
        let mut second = QuestionManager::new();
        first.submit("one").unwrap();
        first.submit("two").unwrap();

        assert_eq!(
            second.submit("one").unwrap(),
            Submission::Submitted(QuestionId(1))
        );
    }

    #[test]
    fn test_submit_answer_unknown_question() {
        let mut manager = QuestionManager::new();
        let err = manager.submit_answer(QuestionId(4), "a").unwrap_err();
        assert_eq!(err, StudyhallError::QuestionNotFound(QuestionId(4)));
    }

    #[test]
    fn test_failed_answer_does_not_burn_an_id() {
        let (mut manager, id) = manager_with_question();
        manager.submit_answer(QuestionId(99), "lost").unwrap_err();
        assert_eq!(manager.submit_answer(id, "kept").unwrap(), AnswerId(1));
    }

    #[test]
    fn test_accept_answer_resolves_question() {
        let (mut manager, id) = manager_with_question();
        let answer = manager.submit_answer(id, "Rayleigh scattering").unwrap();
        manager.accept_answer(id, answer).unwrap();

        let question = manager.get(id).unwrap();
        assert!(question.status().is_resolved());
        assert!(question.answer(answer).unwrap().is_accepted());
        assert!(manager.unresolved().is_empty());
    }

    #[test]
    fn test_accept_second_answer_leaves_first_unaccepted() {
        let (mut manager, id) = manager_with_question();
        let first = manager.submit_answer(id, "Mie scattering").unwrap();
        let second = manager.submit_answer(id, "Rayleigh scattering").unwrap();
        manager.accept_answer(id, second).unwrap();

        let question = manager.get(id).unwrap();
        assert!(question.status().is_resolved());
        assert!(!question.answer(first).unwrap().is_accepted());
        assert!(question.answer(second).unwrap().is_accepted());
    }

    #[test]
    fn test_accept_answer_unknown_question() {
        let mut manager = QuestionManager::new();
        let err = manager.accept_answer(QuestionId(1), AnswerId(1)).unwrap_err();
        assert_eq!(err, StudyhallError::QuestionNotFound(QuestionId(1)));
    }

    #[test]
    fn test_accept_answer_from_other_question() {
        let mut manager = QuestionManager::new();
        let q1 = manager.submit("first").unwrap().question_id();
        let q2 = manager.submit("second").unwrap().question_id();
        let a1 = manager.submit_answer(q1, "belongs to q1").unwrap();

        let err = manager.accept_answer(q2, a1).unwrap_err();
        assert_eq!(
            err,
            StudyhallError::AnswerNotValid {
                question: q2,
                answer: a1
            }
        );
        assert!(manager.get(q2).unwrap().status().is_unresolved());
    }

    #[test]
    fn test_second_acceptance_keeps_first_flag() {
        let (mut manager, id) = manager_with_question();
        let a1 = manager.submit_answer(id, "first").unwrap();
        let a2 = manager.submit_answer(id, "second").unwrap();

        manager.accept_answer(id, a1).unwrap();
        manager.accept_answer(id, a2).unwrap();

        let question = manager.get(id).unwrap();
        assert!(question.answer(a1).unwrap().is_accepted());
        assert!(question.answer(a2).unwrap().is_accepted());
        assert!(question.status().is_resolved());
    }

    #[test]
    fn test_answers_allowed_on_resolved_question() {
        let (mut manager, id) = manager_with_question();
        let a1 = manager.submit_answer(id, "first").unwrap();
        manager.accept_answer(id, a1).unwrap();

        let a2 = manager.submit_answer(id, "late addition").unwrap();
        let question = manager.get(id).unwrap();
        assert!(!question.answer(a2).unwrap().is_accepted());
        assert!(question.status().is_resolved());
    }

    #[test]
    fn test_unresolved_preserves_submission_order() {
        let mut manager = QuestionManager::new();
        let q1 = manager.submit("first").unwrap().question_id();
        let q2 = manager.submit("second").unwrap().question_id();
        let q3 = manager.submit("third").unwrap().question_id();

        let a = manager.submit_answer(q2, "answer").unwrap();
        manager.accept_answer(q2, a).unwrap();

        let ids: Vec<QuestionId> = manager.unresolved().iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec![q1, q3]);
    }

    #[test]
    fn test_with_policy() {
        let mut manager = QuestionManager::with_policy(ContentPolicy::with_max_length(5));
        assert!(manager.submit("short").is_ok());
        assert!(manager.submit("far too long").is_err());
    }
}
