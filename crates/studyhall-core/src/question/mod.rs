//! Question module
//!
//! Handles the question and answer lifecycle: submission, duplicate
//! detection, updates and answer acceptance.

pub mod manager;
pub mod model;

pub use manager::{QuestionManager, Submission};
pub use model::{Answer, Question, QuestionStatus};
