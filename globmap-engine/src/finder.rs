//! Pattern-driven mapping search
//!
//! [`MappingFinder`] expands glob patterns and feeds the matches through the
//! mapping core. Expansion is the only await point; grouping runs to
//! completion afterwards.

use crate::error::Result;
use crate::expander::{ExpandOptions, GlobExpander};
use crate::filter::Filter;
use crate::fs_expander::FsGlobExpander;
use globmap_core::{build_mapping, path, CoreError, Mapping, MappingOptions};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// One or more glob patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patterns(Vec<String>);

impl Patterns {
    /// Patterns as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Take the patterns
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Patterns(vec![pattern.to_string()])
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Patterns(vec![pattern])
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Patterns(patterns)
    }
}

impl From<Vec<&str>> for Patterns {
    fn from(patterns: Vec<&str>) -> Self {
        Patterns(patterns.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Patterns {
    fn from(patterns: &[&str]) -> Self {
        Patterns(patterns.iter().map(|p| p.to_string()).collect())
    }
}

impl From<&[String]> for Patterns {
    fn from(patterns: &[String]) -> Self {
        Patterns(patterns.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Patterns {
    fn from(patterns: [&str; N]) -> Self {
        Patterns(patterns.iter().map(|p| p.to_string()).collect())
    }
}

/// Options for a mapping search
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Patterns used when a request carries none of its own
    pub src: Vec<String>,
    /// Predicate every match must satisfy
    pub filter: Option<Filter>,
    /// Directory that `srcBase` and patterns are relative to
    pub cwd: Option<PathBuf>,
    /// Patterns without `/` match file names anywhere
    pub match_base: bool,
    /// Wildcards match dot-prefixed segments
    pub dot: bool,
    /// Prefix `srcBase` onto paths returned by [`MappingFinder::find`]
    pub prefix_base: bool,
    /// Mapping applied to every match
    pub mapping: MappingOptions,
}

fn take_bool(map: &mut Map<String, Value>, key: &str) -> globmap_core::Result<bool> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(flag),
        Some(other) => Err(CoreError::configuration(format!(
            "{key} must be a boolean, got {other}"
        ))),
    }
}

fn take_patterns(map: &mut Map<String, Value>) -> globmap_core::Result<Vec<String>> {
    match map.remove("src") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(pattern)) => Ok(vec![pattern]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern),
                other => Err(CoreError::configuration(format!(
                    "src entries must be strings, got {other}"
                ))),
            })
            .collect(),
        Some(other) => Err(CoreError::configuration(format!(
            "src must be a string or an array of strings, got {other}"
        ))),
    }
}

impl FindOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from loose structured data
    ///
    /// Understands `src`, `filter`, `cwd`, `matchBase`, `dot` and
    /// `prefixBase`; everything else is handed to
    /// [`MappingOptions::from_value`].
    pub fn from_value(value: Value) -> globmap_core::Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(CoreError::configuration(format!(
                    "options must be an object, got {other}"
                )))
            }
        };

        let src = take_patterns(&mut map)?;
        let filter = match map.remove("filter") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.parse::<Filter>()?),
            Some(other) => {
                return Err(CoreError::configuration(format!(
                    "filter must be a predicate name, got {other}"
                )))
            }
        };
        let cwd = match map.remove("cwd") {
            None | Some(Value::Null) => None,
            Some(Value::String(dir)) => Some(PathBuf::from(dir)),
            Some(other) => {
                return Err(CoreError::configuration(format!(
                    "cwd must be a string, got {other}"
                )))
            }
        };
        let match_base = take_bool(&mut map, "matchBase")?;
        let dot = take_bool(&mut map, "dot")?;
        let prefix_base = take_bool(&mut map, "prefixBase")?;
        let mapping = MappingOptions::from_value(Value::Object(map))?;

        Ok(Self {
            src,
            filter,
            cwd,
            match_base,
            dot,
            prefix_base,
            mapping,
        })
    }

    /// Set the default patterns
    pub fn with_src(mut self, patterns: impl Into<Patterns>) -> Self {
        self.src = patterns.into().into_vec();
        self
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the mapping options
    pub fn with_mapping(mut self, mapping: MappingOptions) -> Self {
        self.mapping = mapping;
        self
    }

    /// Directory the expansion runs in: `cwd` joined with `srcBase`
    ///
    /// Empty values count as absent.
    pub fn expansion_root(&self) -> Option<PathBuf> {
        let cwd = self.cwd.as_deref().filter(|cwd| !cwd.as_os_str().is_empty());
        let base = self
            .mapping
            .src_base
            .as_deref()
            .map(path::trim_trailing_separators)
            .filter(|base| !base.is_empty());

        match (cwd, base) {
            (None, None) => None,
            (Some(cwd), None) => Some(cwd.to_path_buf()),
            (None, Some(base)) => Some(PathBuf::from(base)),
            (Some(cwd), Some(base)) => Some(cwd.join(base)),
        }
    }

    /// Options handed to the expander
    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            cwd: self.expansion_root(),
            filter: self.filter.clone(),
            match_base: self.match_base,
            dot: self.dot,
        }
    }
}

/// Patterns plus options, normalized from either call form
#[derive(Debug, Clone)]
pub struct FindRequest {
    patterns: Vec<String>,
    options: FindOptions,
}

impl FindRequest {
    /// Explicit patterns; they take precedence over `options.src`
    pub fn new(patterns: impl Into<Patterns>, options: FindOptions) -> Self {
        Self {
            patterns: patterns.into().into_vec(),
            options,
        }
    }

    /// Patterns to expand
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Search options
    pub fn options(&self) -> &FindOptions {
        &self.options
    }
}

impl From<FindOptions> for FindRequest {
    fn from(options: FindOptions) -> Self {
        Self {
            patterns: options.src.clone(),
            options,
        }
    }
}

impl<P: Into<Patterns>> From<(P, FindOptions)> for FindRequest {
    fn from((patterns, options): (P, FindOptions)) -> Self {
        Self::new(patterns, options)
    }
}

impl From<&str> for FindRequest {
    fn from(pattern: &str) -> Self {
        Self::new(pattern, FindOptions::default())
    }
}

impl From<Vec<&str>> for FindRequest {
    fn from(patterns: Vec<&str>) -> Self {
        Self::new(patterns, FindOptions::default())
    }
}

impl From<Vec<String>> for FindRequest {
    fn from(patterns: Vec<String>) -> Self {
        Self::new(patterns, FindOptions::default())
    }
}

/// Make an expanded path relative to the expansion root
///
/// Relative matches already are. Absolute matches from a custom expander
/// have the root stripped when they lie under it.
fn strip_expansion_root(matched: &str, absolute_root: Option<&Path>) -> String {
    let candidate = Path::new(matched);
    if candidate.is_absolute() {
        if let Some(relative) = absolute_root.and_then(|root| candidate.strip_prefix(root).ok()) {
            return path::to_slash(&relative.to_string_lossy());
        }
    }
    let slashed = path::to_slash(matched);
    match slashed.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => slashed,
    }
}

/// Expands patterns and maps the matches
#[derive(Debug, Clone, Default)]
pub struct MappingFinder<E = FsGlobExpander> {
    expander: E,
}

impl MappingFinder<FsGlobExpander> {
    /// Finder backed by the filesystem
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: GlobExpander> MappingFinder<E> {
    /// Finder backed by a custom expander
    pub fn with_expander(expander: E) -> Self {
        Self { expander }
    }

    /// The expander in use
    pub fn expander(&self) -> &E {
        &self.expander
    }

    async fn expand_relative(&self, request: &FindRequest) -> Result<Vec<String>> {
        let options = &request.options;
        let root = options.expansion_root();
        let absolute_root = std::path::absolute(root.as_deref().unwrap_or(Path::new("."))).ok();

        tracing::debug!(
            patterns = ?request.patterns,
            root = ?root,
            "expanding patterns"
        );
        let matched = self
            .expander
            .expand(&request.patterns, &options.expand_options())
            .await?;

        Ok(matched
            .iter()
            .map(|candidate| strip_expansion_root(candidate, absolute_root.as_deref()))
            .collect())
    }

    /// Matched paths, relative to `srcBase` (or prefixed with it when
    /// `prefix_base` is set)
    pub async fn find(&self, request: impl Into<FindRequest>) -> Result<Vec<String>> {
        let request = request.into();
        let relative = self.expand_relative(&request).await?;

        let options = &request.options;
        match options.mapping.src_base.as_deref() {
            Some(base) if options.prefix_base => Ok(relative
                .iter()
                .map(|candidate| path::join(base, candidate))
                .collect()),
            _ => Ok(relative),
        }
    }

    /// Expand the request's patterns and map every match
    ///
    /// Fails only with an expansion error, in which case nothing is mapped.
    pub async fn find_mapping(&self, request: impl Into<FindRequest>) -> Result<Mapping> {
        let request = request.into();
        let sources = self.expand_relative(&request).await?;
        let mapping = build_mapping(&sources, &request.options.mapping);

        tracing::debug!(
            sources = sources.len(),
            entries = mapping.len(),
            "mapped expanded sources"
        );
        Ok(mapping)
    }
}

/// Expand patterns on the local filesystem
pub async fn find(request: impl Into<FindRequest>) -> Result<Vec<String>> {
    MappingFinder::new().find(request).await
}

/// Expand patterns on the local filesystem and map the matches
pub async fn find_mapping(request: impl Into<FindRequest>) -> Result<Mapping> {
    MappingFinder::new().find_mapping(request).await
}
