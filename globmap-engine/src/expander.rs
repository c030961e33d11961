//! Glob expansion seam

use crate::error::Result;
use crate::filter::Filter;
use crate::matcher::MatchOptions;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Options passed to a [`GlobExpander`]
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Directory patterns are relative to (current directory when unset)
    pub cwd: Option<PathBuf>,
    /// Predicate every match must satisfy
    pub filter: Option<Filter>,
    /// Patterns without `/` match file names anywhere
    pub match_base: bool,
    /// Wildcards match dot-prefixed segments
    pub dot: bool,
}

impl ExpandOptions {
    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Matching flags derived from these options
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            match_base: self.match_base,
            dot: self.dot,
        }
    }
}

/// Resolves glob patterns to concrete paths
///
/// Implementations return paths relative to [`ExpandOptions::cwd`], without
/// duplicates, in a deterministic order.
#[async_trait]
pub trait GlobExpander: Send + Sync {
    /// Expand `patterns`
    async fn expand(&self, patterns: &[String], options: &ExpandOptions) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: GlobExpander + ?Sized> GlobExpander for Arc<T> {
    async fn expand(&self, patterns: &[String], options: &ExpandOptions) -> Result<Vec<String>> {
        (**self).expand(patterns, options).await
    }
}

#[async_trait]
impl<T: GlobExpander + ?Sized> GlobExpander for Box<T> {
    async fn expand(&self, patterns: &[String], options: &ExpandOptions) -> Result<Vec<String>> {
        (**self).expand(patterns, options).await
    }
}
