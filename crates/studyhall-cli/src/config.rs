//! Configuration loading
//!
//! Looks for `studyhall.toml` in the working directory, then in the platform
//! config directory. A missing file falls back to defaults; a file that
//! exists but cannot be read or parsed is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use studyhall_core::config::Config;

/// File name searched for when no --config path is given
pub const CONFIG_FILE: &str = "studyhall.toml";

/// Load configuration, preferring an explicitly named file
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    for path in candidate_paths() {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            return read_config(&path);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dirs) = directories::ProjectDirs::from("com", "studyhall", "studyhall") {
        paths.push(dirs.config_dir().join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[registration]\npassword_min_length = 8\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.registration.password_min_length, 8);
        // unspecified sections keep their defaults
        assert_eq!(config.content.max_length, 10000);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_explicit_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[registration\n").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_candidate_paths_start_local() {
        let paths = candidate_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE));
    }
}
