//! Glob expansion and mapping orchestration
//!
//! This crate resolves glob patterns to source paths and maps them with
//! [`globmap_core`]. Expansion is asynchronous; everything after it is the
//! synchronous mapping core.

#![warn(missing_docs)]

pub mod error;
pub mod expander;
pub mod filter;
pub mod finder;
pub mod fs_expander;
pub mod matcher;

// Re-export key types
pub use error::{ExpansionError, Result};
pub use expander::{ExpandOptions, GlobExpander};
pub use filter::Filter;
pub use finder::{find, find_mapping, FindOptions, FindRequest, MappingFinder, Patterns};
pub use fs_expander::{expand_blocking, FsGlobExpander};
pub use matcher::{is_match, match_paths, MatchOptions};

// Re-export from core for convenience
pub use globmap_core::{
    build_mapping, compute_dest, ExtDot, Mapping, MappingEntry, MappingOptions,
};
