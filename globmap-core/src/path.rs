//! Slash-normalized path helpers
//!
//! All paths handled by the mapping core are plain strings that use `/` as
//! the separator regardless of the host platform. These helpers do the
//! string-level work that `std::path` would otherwise do with host rules.

use std::path::MAIN_SEPARATOR;

/// Path separator used for every path the core produces
pub const SEPARATOR: char = '/';

/// Convert host separators to `/`
pub fn to_slash(path: &str) -> String {
    if MAIN_SEPARATOR == SEPARATOR {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Remove trailing separators from a base path
///
/// A base made only of separators is the filesystem root and stays `/`.
pub fn trim_trailing_separators(base: &str) -> &str {
    let trimmed = base.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && !base.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Normalize a slash path the way a POSIX path join does
///
/// Repeated separators collapse, `.` segments drop, `..` consumes the
/// preceding normal segment (and is kept when there is none on a relative
/// path). An empty relative result is `.`.
pub fn normalize(path: &str) -> String {
    let path = to_slash(path);
    let absolute = path.starts_with(SEPARATOR);
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `/..` is still the root
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join `base` and `path` with exactly one separator, then normalize
pub fn join(base: &str, path: &str) -> String {
    let base = to_slash(base);
    let base = trim_trailing_separators(&base);
    if base.is_empty() {
        return normalize(path);
    }
    normalize(&format!("{base}/{}", to_slash(path)))
}

/// Split a slash path into its directory part (with trailing `/`) and its
/// final segment
pub fn split_file_name(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(idx) => (&path[..=idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Final segment of a slash path; the whole path when it has no separator
pub fn file_name(path: &str) -> &str {
    split_file_name(path).1
}
