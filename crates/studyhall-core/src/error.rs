//! Error types for studyhall

use thiserror::Error;

use crate::types::{AnswerId, QuestionId, ReviewId};

/// Main error type for studyhall
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyhallError {
    /// A field failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// No account under that username
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Username already registered
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Question not found
    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    /// The answer does not belong to the given question
    #[error("Answer {answer} is not valid for question {question}")]
    AnswerNotValid {
        question: QuestionId,
        answer: AnswerId,
    },

    /// Review not found
    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),

    /// Login rejected
    #[error("Login failed: {0}")]
    Auth(AuthFailure),

    /// Deleting this account would leave the store without an admin
    #[error("Cannot delete the only admin account")]
    LastAdminAccount,

    /// Revoking this role would leave the store without an admin
    #[error("Cannot remove the only admin role")]
    LastAdminRole,

    /// The first registered account must be the admin account
    #[error("The first registered user must be an admin")]
    FirstUserMustBeAdmin,

    /// Deletion attempted without the exact confirmation token
    #[error("Deletion cancelled: confirmation required")]
    ConfirmationRequired,
}

/// Why a login was rejected
///
/// The three cases stay distinct so callers can audit failed logins even
/// when they render them uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Username or password left blank
    #[error("All fields are required")]
    MissingCredentials,

    /// No account under that username
    #[error("User does not exist")]
    UnknownUser,

    /// Credential check failed
    #[error("Invalid username or password")]
    WrongPassword,
}

/// Coarse classification callers can branch on without matching variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Invariant,
    Auth,
    Confirmation,
}

impl StudyhallError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StudyhallError::Validation(_) => ErrorKind::Validation,
            StudyhallError::UserNotFound(_)
            | StudyhallError::QuestionNotFound(_)
            | StudyhallError::AnswerNotValid { .. }
            | StudyhallError::ReviewNotFound(_) => ErrorKind::NotFound,
            StudyhallError::UsernameTaken(_) => ErrorKind::Conflict,
            StudyhallError::Auth(_) => ErrorKind::Auth,
            StudyhallError::LastAdminAccount
            | StudyhallError::LastAdminRole
            | StudyhallError::FirstUserMustBeAdmin => ErrorKind::Invariant,
            StudyhallError::ConfirmationRequired => ErrorKind::Confirmation,
        }
    }
}

/// Result type alias for studyhall
pub type Result<T> = std::result::Result<T, StudyhallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudyhallError::UserNotFound("ghost".to_string());
        assert_eq!(err.to_string(), "User not found: ghost");
    }

    #[test]
    fn test_answer_not_valid_display() {
        let err = StudyhallError::AnswerNotValid {
            question: QuestionId(3),
            answer: AnswerId(7),
        };
        assert_eq!(err.to_string(), "Answer 7 is not valid for question 3");
    }

    #[test]
    fn test_auth_failure_messages_are_distinct() {
        let missing = StudyhallError::Auth(AuthFailure::MissingCredentials).to_string();
        let unknown = StudyhallError::Auth(AuthFailure::UnknownUser).to_string();
        let wrong = StudyhallError::Auth(AuthFailure::WrongPassword).to_string();
        assert_ne!(missing, unknown);
        assert_ne!(unknown, wrong);
        assert!(wrong.starts_with("Login failed:"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            StudyhallError::Validation("bad".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            StudyhallError::QuestionNotFound(QuestionId(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StudyhallError::UsernameTaken("alice".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(StudyhallError::LastAdminRole.kind(), ErrorKind::Invariant);
        assert_eq!(
            StudyhallError::ConfirmationRequired.kind(),
            ErrorKind::Confirmation
        );
    }
}
