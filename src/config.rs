//! Session configuration.
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! user = "ada"
//! host = "gpu-box"
//! home = "/home/ada"
//! prompt = "$ "
//! history_limit = 500
//! hint_after_attempts = 3
//! command_sets = ["tools", "ai"]
//! seed_filesystem = true
//! ```
//!
//! Command sets:
//! - `tools` - canned `git`, `tmux`, `python` and `nvim`
//! - `ai` - canned ML tooling (`nvidia-smi`, `conda`, `pip`, ...) plus a
//!   sample project in the home directory

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::history::HISTORY_LIMIT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub user: String,
    pub host: String,
    pub home: String,
    pub prompt: String,
    /// 0 keeps every entry.
    pub history_limit: usize,
    /// Consecutive misses on a lesson step before its hint is shown.
    pub hint_after_attempts: u32,
    pub command_sets: Vec<String>,
    pub seed_filesystem: bool,
    pub welcome_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "ai-dev".to_string(),
            home: "/home/user".to_string(),
            prompt: "$ ".to_string(),
            history_limit: HISTORY_LIMIT,
            hint_after_attempts: 1,
            command_sets: vec!["tools".to_string()],
            seed_filesystem: true,
            welcome_message: "Welcome to Terminal Simulator\nType \"help\" for available commands"
                .to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), user = %config.user, "loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.home.starts_with('/') {
            return Err(ConfigError::InvalidHome(self.home.clone()));
        }
        Ok(())
    }

    pub fn has_command_set(&self, name: &str) -> bool {
        self.command_sets.iter().any(|set| set == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.home, "/home/user");
        assert!(config.has_command_set("tools"));
        assert!(!config.has_command_set("ai"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            user = "ada"
            command_sets = ["ai"]
            hint_after_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.user, "ada");
        assert_eq!(config.host, "ai-dev");
        assert_eq!(config.hint_after_attempts, 3);
        assert!(config.has_command_set("ai"));
        assert!(!config.has_command_set("tools"));
    }

    #[test]
    fn test_relative_home_rejected() {
        let err = SessionConfig::from_toml_str(r#"home = "home/ada""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHome(ref h) if h == "home/ada"));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            SessionConfig::from_toml_str("user = ["),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SessionConfig::load("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
