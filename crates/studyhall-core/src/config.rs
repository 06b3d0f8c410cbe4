//! Configuration management for studyhall

use serde::{Deserialize, Serialize};

use crate::account::policy::{RegistrationPolicy, MIN_PASSWORD_LENGTH};
use crate::validate::{ContentPolicy, MAX_CONTENT_LENGTH};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registration settings
    pub registration: RegistrationConfig,
    /// Free-text content settings
    pub content: ContentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registration: RegistrationConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

impl Config {
    /// Policy view for the account manager
    pub fn registration_policy(&self) -> RegistrationPolicy {
        RegistrationPolicy::with_password_min_length(self.registration.password_min_length)
    }

    /// Policy view for the question and review managers
    pub fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::with_max_length(self.content.max_length)
    }
}

/// Registration-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Minimum password length accepted at registration
    pub password_min_length: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            password_min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

/// Free-text content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Maximum length for questions, answers and reviews
    pub max_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_CONTENT_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.registration.password_min_length, 6);
        assert_eq!(config.content.max_length, 10000);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[registration]"));
        assert!(toml.contains("[content]"));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(
            config.registration.password_min_length,
            config2.registration.password_min_length
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[registration]\npassword_min_length = 10\n").unwrap();
        assert_eq!(config.registration.password_min_length, 10);
        assert_eq!(config.content.max_length, MAX_CONTENT_LENGTH);
    }

    #[test]
    fn test_policy_views() {
        let mut config = Config::default();
        config.content.max_length = 80;
        assert_eq!(config.content_policy().max_length(), 80);
        assert_eq!(config.registration_policy().password_min_length(), 6);
    }
}
