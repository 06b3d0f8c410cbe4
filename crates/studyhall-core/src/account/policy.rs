//! Registration policy

use crate::error::{Result, StudyhallError};

/// Minimum password length (default)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Rules applied when an account is created or its password changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    password_min_length: usize,
}

impl RegistrationPolicy {
    /// Create a policy with default settings
    pub fn new() -> Self {
        Self {
            password_min_length: MIN_PASSWORD_LENGTH,
        }
    }

    /// Create a policy with a custom minimum password length
    pub fn with_password_min_length(password_min_length: usize) -> Self {
        Self {
            password_min_length,
        }
    }

    /// The configured minimum password length
    pub fn password_min_length(&self) -> usize {
        self.password_min_length
    }

    /// Check a password; length is measured in characters, not bytes
    pub fn check_password(&self, password: &str) -> Result<()> {
        if password.trim().is_empty() || password.chars().count() < self.password_min_length {
            return Err(StudyhallError::Validation(format!(
                "Password must be at least {} characters long",
                self.password_min_length
            )));
        }
        Ok(())
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self::new()
    }
}
