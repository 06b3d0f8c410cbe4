//! Shared validation for free-text fields

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, StudyhallError};

/// Maximum free-text length (default)
pub const MAX_CONTENT_LENGTH: usize = 10000;

/// Policy for free-text fields: non-blank and bounded in length
///
/// Values are stored exactly as supplied. Trimming happens only for the
/// emptiness check, and length is measured in characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentPolicy {
    max_length: usize,
}

impl ContentPolicy {
    /// Create a policy with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
        }
    }

    /// Create a policy with a custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// The configured maximum length
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Check one field; `field` names it in the error message
    pub fn check(&self, field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(StudyhallError::Validation(format!(
                "{} cannot be empty",
                field
            )));
        }

        if value.chars().count() > self.max_length {
            return Err(StudyhallError::Validation(format!(
                "{} exceeds maximum length of {} characters",
                field, self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the shape of an email address
///
/// Accepts `local@domain` where the local part is alphanumeric plus
/// `+ _ . -` and the domain is alphanumeric plus `. -`.
pub fn is_valid_email(email: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new("^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("valid regex")
    });
    RE.is_match(email)
}
