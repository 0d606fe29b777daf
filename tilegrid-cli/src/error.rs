//! CLI error handling with user-friendly messages.
//!
//! Every failure is reported on stderr and exits with status 1.

use std::fmt;
use std::process;
use tilegrid::config::ConfigError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file could not be loaded
    Config(ConfigError),
    /// Tile index outside the grid
    TileOutOfRange {
        x: i32,
        y: i32,
        num_tiles_x: i32,
        num_tiles_y: i32,
    },
    /// Failed to serialize JSON output
    Json(serde_json::Error),
}

impl CliError {
    /// Exit the process with an error message.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::TileOutOfRange { .. } = self {
            eprintln!();
            eprintln!("Run `tilegrid layout` to see the grid dimensions.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::TileOutOfRange {
                x,
                y,
                num_tiles_x,
                num_tiles_y,
            } => write!(
                f,
                "Tile ({}, {}) is outside the {}x{} grid",
                x, y, num_tiles_x, num_tiles_y
            ),
            CliError::Json(e) => write!(f, "Failed to encode JSON: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::TileOutOfRange { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
