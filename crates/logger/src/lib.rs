//! Logging infrastructure for linefind.
//!
//! A thread-safe file logger installed as the backend of the `log` facade,
//! so every crate logs through `log::debug!` and friends.

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Global logger state
#[derive(Debug)]
struct Logger {
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path
    file_path: PathBuf,
}

impl Logger {
    /// Create new logger instance
    fn new(file_path: PathBuf, min_level: LogLevel) -> Self {
        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        // Clear log file on startup
        if let Ok(mut file) = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
        {
            let _ = writeln!(file, "=== linefind log start ===");
        }

        Self {
            min_level,
            file_path,
        }
    }

    /// Append a line to the log file
    fn write(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S");

        // Write to file (create if deleted)
        if let Ok(mut file) = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.file_path)
        {
            let _ = writeln!(file, "[{}] {}: {}", timestamp, level.to_str(), message);
        }
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Forwards `log` facade records into the global logger
struct FacadeBridge;

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(Ok(logger)) = LOGGER.get().map(Mutex::lock) {
            logger.write(
                LogLevel::from(record.level()),
                &format!("{}: {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

static BRIDGE: FacadeBridge = FacadeBridge;

/// Initialize the global logger
///
/// Must be called once at application startup. Messages logged before
/// that are dropped. Subsequent calls will be ignored.
///
/// # Arguments
///
/// * `file_path` - Path to the log file
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: PathBuf, min_level: LogLevel) {
    if LOGGER.get().is_some() {
        return;
    }
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, min_level)));

    // Another facade backend may already be installed (e.g. by a test harness)
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(min_level.to_level_filter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
        assert!(LogLevel::Debug < LogLevel::Error);
    }

    #[test]
    fn test_facade_level_mapping() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Error), LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_logger_writes_file_above_min_level() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("test.log");

        let logger = Logger::new(path.clone(), LogLevel::Info);
        logger.write(LogLevel::Debug, "filtered");
        logger.write(LogLevel::Info, "one");
        logger.write(LogLevel::Error, "two");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== linefind log start ==="));
        assert!(content.contains("INFO: one"));
        assert!(content.contains("ERROR: two"));
        assert!(!content.contains("filtered"));
    }

    #[test]
    fn test_logger_recreates_deleted_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("test.log");

        let logger = Logger::new(path.clone(), LogLevel::Debug);
        std::fs::remove_file(&path).unwrap();
        logger.write(LogLevel::Debug, "after delete");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("DEBUG: after delete"));
    }
}
