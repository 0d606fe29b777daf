//! Logging infrastructure for tilegrid.
//!
//! Provides structured logging with file output and console output:
//! - Writes to `logs/tilegrid.log` (cleared on session start)
//! - Also prints to stderr so stdout stays clean for command output
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file,
/// and sets up dual output to both file and stderr.
///
/// # Errors
///
/// Returns error if log directory cannot be created or log file cannot be cleared
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;

    // Truncate whatever the previous session left behind
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    // Defaults to INFO if RUST_LOG not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get default log directory path.
pub fn default_log_dir() -> &'static str {
    "logs"
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    "tilegrid.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "tilegrid.log");
    }

    #[test]
    fn test_init_logging_creates_and_truncates_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_dir = dir.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap();

        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("test.log"), "old log data").unwrap();

        // Only one test may install the global subscriber
        let _guard = init_logging(log_dir_str, "test.log").expect("Failed to init logging");

        assert!(log_dir.join("test.log").exists());
        assert!(!fs::read_to_string(log_dir.join("test.log"))
            .unwrap()
            .contains("old log data"));
    }
}
