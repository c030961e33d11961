//! Predicates applied to expanded paths

use globmap_core::CoreError;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Custom filter predicate over the on-disk path
pub type FilterFn = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Keeps only matched paths that satisfy a predicate
#[derive(Clone)]
pub enum Filter {
    /// Regular files (symlinks followed)
    IsFile,
    /// Directories (symlinks followed)
    IsDirectory,
    /// Symbolic links themselves
    IsSymlink,
    /// Caller-supplied predicate
    Custom(FilterFn),
}

impl Filter {
    /// Wrap a closure as a filter
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Filter::Custom(Arc::new(predicate))
    }

    /// Test a path; a path that cannot be inspected does not pass
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            Filter::IsFile => fs::metadata(path).map(|m| m.is_file()).unwrap_or(false),
            Filter::IsDirectory => fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false),
            Filter::IsSymlink => fs::symlink_metadata(path)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false),
            Filter::Custom(predicate) => predicate(path),
        }
    }
}

impl FromStr for Filter {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "isFile" => Ok(Filter::IsFile),
            "isDirectory" => Ok(Filter::IsDirectory),
            "isSymbolicLink" => Ok(Filter::IsSymlink),
            other => Err(CoreError::configuration(format!(
                "unknown filter \"{other}\" (expected isFile, isDirectory or isSymbolicLink)"
            ))),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::IsFile => f.write_str("IsFile"),
            Filter::IsDirectory => f.write_str("IsDirectory"),
            Filter::IsSymlink => f.write_str("IsSymlink"),
            Filter::Custom(_) => f.debug_tuple("Custom").field(&"<fn>").finish(),
        }
    }
}
