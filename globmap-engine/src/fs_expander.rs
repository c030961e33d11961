//! Filesystem-backed glob expansion

use crate::error::{ExpansionError, Result};
use crate::expander::{ExpandOptions, GlobExpander};
use crate::matcher::{compile_all, CompiledPattern};
use async_trait::async_trait;
use globmap_core::path;
use indexmap::IndexSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expands patterns against the local filesystem
///
/// The directory walk runs on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsGlobExpander;

impl FsGlobExpander {
    /// Create an expander
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GlobExpander for FsGlobExpander {
    async fn expand(&self, patterns: &[String], options: &ExpandOptions) -> Result<Vec<String>> {
        let patterns = patterns.to_vec();
        let options = options.clone();
        tokio::task::spawn_blocking(move || expand_blocking(&patterns, &options)).await?
    }
}

/// Expand `patterns` on the calling thread
///
/// Matches are unioned in pattern order and, within a pattern, in walk order
/// (depth first, directory entries sorted by name). `!` patterns remove
/// earlier matches. Paths come back relative to the working directory.
pub fn expand_blocking<S: AsRef<str>>(patterns: &[S], options: &ExpandOptions) -> Result<Vec<String>> {
    let cwd = options.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    let compiled = compile_all(patterns, options.match_options())?;
    let mut matched: IndexSet<String> = IndexSet::new();

    for pattern in &compiled {
        if pattern.is_negated() {
            let before = matched.len();
            matched.retain(|candidate| !pattern.is_match(candidate));
            tracing::trace!(
                pattern = pattern.as_str(),
                removed = before - matched.len(),
                "applied exclusion"
            );
            continue;
        }

        for candidate in walk_matches(&cwd, pattern)? {
            let accepted = options
                .filter
                .as_ref()
                .map_or(true, |filter| filter.accepts(&cwd.join(&candidate)));
            if accepted {
                matched.insert(candidate);
            }
        }
    }

    tracing::debug!(
        cwd = %cwd.display(),
        patterns = compiled.len(),
        matched = matched.len(),
        "expanded patterns"
    );
    Ok(matched.into_iter().collect())
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

/// Paths under `cwd` matched by one positive pattern, in walk order
fn walk_matches(cwd: &Path, pattern: &CompiledPattern) -> Result<Vec<String>> {
    if pattern.as_str().is_empty() {
        return Ok(Vec::new());
    }

    if pattern.is_literal() {
        let exists = cwd.join(pattern.as_str()).symlink_metadata().is_ok();
        return Ok(if exists {
            vec![pattern.as_str().to_string()]
        } else {
            Vec::new()
        });
    }

    let walk_root = pattern.walk_root();
    let root = if walk_root.is_empty() {
        cwd.to_path_buf()
    } else {
        cwd.join(&walk_root)
    };

    let prune_hidden = !pattern.allows_dot();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            let hidden = entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.');
            !(prune_hidden && hidden)
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // No such directory, nothing to match
            Err(err) if err.depth() == 0 && is_not_found(&err) => break,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                return Err(ExpansionError::Walk { path, source: err });
            }
        };

        let relative = entry.path().strip_prefix(cwd).unwrap_or(entry.path());
        let relative = path::to_slash(&relative.to_string_lossy());
        if relative.is_empty() {
            continue;
        }
        if pattern.is_match(&relative) {
            found.push(relative);
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for file in [
            "src/main.rs",
            "src/lib.rs",
            "src/util/helpers.rs",
            "src/util/.hidden.rs",
            "docs/guide.md",
            "README.md",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, file).unwrap();
        }
        temp_dir
    }

    fn options(dir: &TempDir) -> ExpandOptions {
        ExpandOptions::default().with_cwd(dir.path())
    }

    #[test]
    fn test_walk_order_is_sorted_depth_first() {
        let dir = fixture();
        let matched = expand_blocking(&["**/*.rs"], &options(&dir)).unwrap();
        assert_eq!(
            matched,
            vec!["src/lib.rs", "src/main.rs", "src/util/helpers.rs"]
        );
    }

    #[test]
    fn test_union_across_patterns_keeps_first_occurrence() {
        let dir = fixture();
        let matched =
            expand_blocking(&["**/*.md", "src/*.rs", "README.md"], &options(&dir)).unwrap();
        assert_eq!(
            matched,
            vec!["README.md", "docs/guide.md", "src/lib.rs", "src/main.rs"]
        );
    }

    #[test]
    fn test_exclusion_pattern() {
        let dir = fixture();
        let matched = expand_blocking(&["src/**/*.rs", "!**/main.rs"], &options(&dir)).unwrap();
        assert_eq!(matched, vec!["src/lib.rs", "src/util/helpers.rs"]);
    }

    #[test]
    fn test_filter_directories() {
        let dir = fixture();
        let opts = options(&dir).with_filter(Filter::IsDirectory);
        let matched = expand_blocking(&["**"], &opts).unwrap();
        assert_eq!(matched, vec!["docs", "src", "src/util"]);

        let opts = options(&dir).with_filter(Filter::IsFile);
        let matched = expand_blocking(&["src/*"], &opts).unwrap();
        assert_eq!(matched, vec!["src/lib.rs", "src/main.rs"]);
    }

    #[test]
    fn test_dot_option() {
        let dir = fixture();
        let mut opts = options(&dir);
        opts.dot = true;
        let matched = expand_blocking(&["src/util/*.rs"], &opts).unwrap();
        assert_eq!(matched, vec!["src/util/.hidden.rs", "src/util/helpers.rs"]);
    }

    #[test]
    fn test_match_base_option() {
        let dir = fixture();
        let mut opts = options(&dir);
        opts.match_base = true;
        let matched = expand_blocking(&["*.md"], &opts).unwrap();
        assert_eq!(matched, vec!["README.md", "docs/guide.md"]);
    }

    #[test]
    fn test_literal_pattern() {
        let dir = fixture();
        let matched = expand_blocking(&["./docs/guide.md", "nope.md"], &options(&dir)).unwrap();
        assert_eq!(matched, vec!["docs/guide.md"]);
    }

    #[test]
    fn test_hidden_directories_are_skipped_without_dot() {
        let dir = fixture();
        let cache = dir.path().join(".cache/deep");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("stale.rs"), "").unwrap();

        let matched = expand_blocking(&["**/*.rs"], &options(&dir)).unwrap();
        assert!(matched.iter().all(|path| !path.starts_with(".cache")));

        let matched = expand_blocking(&[".cache/**/*.rs"], &options(&dir)).unwrap();
        assert_eq!(matched, vec![".cache/deep/stale.rs"]);

        let mut opts = options(&dir);
        opts.dot = true;
        let matched = expand_blocking(&["**/stale.rs"], &opts).unwrap();
        assert_eq!(matched, vec![".cache/deep/stale.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_hidden_directory_is_not_walked() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let locked = dir.path().join(".locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = expand_blocking(&["**/*.rs"], &options(&dir));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            result.unwrap(),
            vec!["src/lib.rs", "src/main.rs", "src/util/helpers.rs"]
        );
    }

    #[test]
    fn test_missing_walk_root_yields_nothing() {
        let dir = fixture();
        let matched = expand_blocking(&["missing/**/*.rs"], &options(&dir)).unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn test_invalid_pattern_fails_before_walking() {
        let dir = fixture();
        let err = expand_blocking(&["**/*.rs", "src/[", ], &options(&dir)).unwrap_err();
        assert!(matches!(err, ExpansionError::InvalidPattern { .. }));
    }

    #[tokio::test]
    async fn test_async_expand_matches_blocking() {
        let dir = fixture();
        let patterns = vec!["**/*.rs".to_string()];
        let opts = options(&dir);
        let expected = expand_blocking(&patterns, &opts).unwrap();
        let actual = FsGlobExpander::new().expand(&patterns, &opts).await.unwrap();
        assert_eq!(actual, expected);
    }
}
