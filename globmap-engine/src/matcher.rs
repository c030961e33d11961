//! Glob pattern compilation and in-memory matching
//!
//! Patterns use `globset` syntax with `/` as a literal separator. A leading
//! `!` turns a pattern into an exclusion that removes earlier matches.

use crate::error::{ExpansionError, Result};
use globmap_core::path;
use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexSet;

const META_CHARS: &[char] = &['*', '?', '[', '{'];

/// Options that change how a pattern matches a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Patterns without `/` match against the file name only
    pub match_base: bool,
    /// Wildcards also match segments starting with `.`
    pub dot: bool,
}

fn has_meta(text: &str) -> bool {
    text.contains(META_CHARS)
}

fn is_hidden(segment: &str) -> bool {
    segment.starts_with('.') && segment != "." && segment != ".."
}

fn has_hidden_segment(candidate: &str) -> bool {
    candidate.split('/').any(is_hidden)
}

/// A single compiled pattern
#[derive(Debug, Clone)]
pub(crate) struct CompiledPattern {
    text: String,
    negated: bool,
    base_only: bool,
    allows_dot: bool,
    matcher: GlobMatcher,
}

impl CompiledPattern {
    pub(crate) fn compile(raw: &str, options: MatchOptions) -> Result<Self> {
        let (negated, body) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let slashed = path::to_slash(body);
        let text = slashed.strip_prefix("./").unwrap_or(&slashed).to_string();

        let matcher = GlobBuilder::new(&text)
            .literal_separator(true)
            .build()
            .map_err(|source| ExpansionError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?
            .compile_matcher();

        let base_only = options.match_base && !text.contains('/');
        let allows_dot = options.dot || text.split('/').any(is_hidden);

        Ok(Self {
            text,
            negated,
            base_only,
            allows_dot,
            matcher,
        })
    }

    /// Pattern text without the exclusion marker
    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// True when wildcards may match hidden segments
    pub(crate) fn allows_dot(&self) -> bool {
        self.allows_dot
    }

    pub(crate) fn is_negated(&self) -> bool {
        self.negated
    }

    /// True when the pattern names exactly one path
    pub(crate) fn is_literal(&self) -> bool {
        !self.base_only && !has_meta(&self.text)
    }

    /// Leading directories of the pattern that contain no wildcards
    pub(crate) fn walk_root(&self) -> String {
        if self.base_only {
            return String::new();
        }
        let segments: Vec<&str> = self.text.split('/').collect();
        let literal = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .take_while(|segment| !has_meta(segment))
            .copied()
            .collect::<Vec<_>>();
        literal.join("/")
    }

    pub(crate) fn is_match(&self, candidate: &str) -> bool {
        if !self.allows_dot && has_hidden_segment(candidate) {
            return false;
        }
        let subject = if self.base_only {
            path::file_name(candidate)
        } else {
            candidate
        };
        self.matcher.is_match(subject)
    }
}

/// Compile every pattern, failing on the first invalid one
pub(crate) fn compile_all<S: AsRef<str>>(
    patterns: &[S],
    options: MatchOptions,
) -> Result<Vec<CompiledPattern>> {
    patterns
        .iter()
        .map(|pattern| CompiledPattern::compile(pattern.as_ref(), options))
        .collect()
}

/// Filter `paths` by `patterns`
///
/// Patterns apply in order: a positive pattern adds the paths it matches, an
/// exclusion removes them from what has been collected so far. Each path
/// appears once, at its first match.
pub fn match_paths<P, S>(patterns: &[P], paths: &[S], options: MatchOptions) -> Result<Vec<String>>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let compiled = compile_all(patterns, options)?;
    let mut matched: IndexSet<String> = IndexSet::new();

    for pattern in &compiled {
        if pattern.is_negated() {
            matched.retain(|candidate| !pattern.is_match(candidate));
            continue;
        }
        for candidate in paths {
            let candidate = path::to_slash(candidate.as_ref());
            if pattern.is_match(&candidate) {
                matched.insert(candidate);
            }
        }
    }

    Ok(matched.into_iter().collect())
}

/// True when `candidate` survives `patterns`
pub fn is_match<P: AsRef<str>>(patterns: &[P], candidate: &str, options: MatchOptions) -> Result<bool> {
    Ok(!match_paths(patterns, &[candidate], options)?.is_empty())
}
