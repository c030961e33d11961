//! Core error types

use thiserror::Error;

/// Errors raised by the mapping core
///
/// Mapping itself is total; the only failure is a malformed configuration
/// handed in as loose structured data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Build a configuration error from any displayable message
    pub fn configuration(msg: impl Into<String>) -> Self {
        CoreError::Configuration(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Configuration(err.to_string())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
