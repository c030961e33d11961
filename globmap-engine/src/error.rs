//! Expansion error types

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning patterns into source paths
///
/// This is the only error a mapping search reports. Nothing is mapped when
/// it occurs.
#[derive(Error, Debug)]
pub enum ExpansionError {
    /// Pattern could not be compiled
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// Compiler diagnostic
        #[source]
        source: globset::Error,
    },

    /// Directory walk failed
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        /// Path the walk failed at
        path: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// Blocking expansion task did not complete
    #[error("expansion task failed: {0}")]
    TaskFailed(String),

    /// Failure reported by a custom expander
    #[error("expander error: {0}")]
    Expander(String),
}

impl From<tokio::task::JoinError> for ExpansionError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExpansionError::TaskFailed(err.to_string())
    }
}

/// Result type for expansion operations
pub type Result<T> = std::result::Result<T, ExpansionError>;
