//! Configuration management for linefind.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, LoggingSettings, SearchSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const MATCH_CASE: bool = false;
    pub const WHOLE_WORD: bool = false;
    pub const DIRECTION: &str = "forward";
    pub const WRAP_AROUND: bool = false;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "linefind.log";
}

impl Config {
    /// Load configuration from the XDG config directory.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let original_content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&original_content)
                .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(&config_path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file without touching it.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Save configuration to the XDG config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_file_path()?)
    }

    /// Save configuration to specified file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Log file path: the configured override, or the cache directory.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(ref path) = self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .unwrap_or_else(|_| std::env::temp_dir())
            .join(defaults::LOG_FILE_NAME)
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.search.match_case);
        assert!(!config.search.whole_word);
        assert!(!config.search.wrap_around);
        assert_eq!(config.search.direction, "forward");
        assert_eq!(config.logging.min_level, "info");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::validate_content("[search]\nwhole_word = true\n").unwrap();
        assert!(config.search.whole_word);
        assert!(!config.search.match_case);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        assert!(Config::validate_content("[search]\nwhole_word = \"yes\"\n").is_err());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.wrap_around = true;
        config.search.direction = "backward".to_string();
        config.logging.file_path = Some("/tmp/linefind-test.log".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.log_file_path(),
            PathBuf::from("/tmp/linefind-test.log")
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from(dir.path().join("absent.toml")).is_err());
    }
}
