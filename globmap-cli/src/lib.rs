//! globmap CLI library
//!
//! This library provides the command-line interface for globmap: mapping
//! source paths, or the matches of glob patterns, to destination paths.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod rename;

pub use error::{CliError, CliResult};
