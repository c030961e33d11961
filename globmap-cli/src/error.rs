//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No patterns given on the command line or in the config file
    MissingPatterns,
    /// Rename template could not be parsed
    InvalidTemplate(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingPatterns => {
                write!(f, "No patterns given (pass them as arguments or set `src` in the config file)")
            }
            CliError::InvalidTemplate(msg) => write!(f, "Invalid rename template: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
