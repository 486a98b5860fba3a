//! Configuration structures for linefind settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default search flags and scan behaviour
    #[serde(default)]
    pub search: SearchSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Case-sensitive matching by default
    #[serde(default = "default_match_case")]
    pub match_case: bool,

    /// Whole-word matching by default
    #[serde(default = "default_whole_word")]
    pub whole_word: bool,

    /// Initial search direction (forward or backward)
    #[serde(default = "default_direction")]
    pub direction: String,

    /// Continue from the other end of the document when a scan runs out
    #[serde(default = "default_wrap_around")]
    pub wrap_around: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_match_case() -> bool {
    defaults::MATCH_CASE
}

fn default_whole_word() -> bool {
    defaults::WHOLE_WORD
}

fn default_direction() -> String {
    defaults::DIRECTION.to_string()
}

fn default_wrap_around() -> bool {
    defaults::WRAP_AROUND
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

// Default implementations
impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            match_case: default_match_case(),
            whole_word: default_whole_word(),
            direction: default_direction(),
            wrap_around: default_wrap_around(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
