//! Rename templates
//!
//! The command line cannot pass a closure, so renames are written as
//! templates such as `build/all.{ext}`. Placeholders:
//!
//! - `{dest}`: destination computed by the earlier steps
//! - `{dir}`: its directory (empty at top level)
//! - `{name}`: its final segment
//! - `{stem}`: final segment up to the last dot
//! - `{ext}`: text after the last dot of the final segment
//! - `{KEY}`: any custom value from the configuration

use crate::error::CliError;
use globmap_core::{path, MappingOptions, RenameFn};
use serde_json::Value;
use std::sync::Arc;

const BUILTINS: &[&str] = &["dest", "dir", "name", "stem", "ext"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

fn parse(template: &str) -> Result<Vec<Segment>, CliError> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            CliError::InvalidTemplate(format!("unclosed '{{' in \"{template}\""))
        })?;
        let key = after[..close].trim();
        if key.is_empty() {
            return Err(CliError::InvalidTemplate(format!(
                "empty placeholder in \"{template}\""
            )));
        }
        segments.push(Segment::Placeholder(key.to_string()));
        rest = &after[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(segments)
}

fn extra_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Split a file name at its last dot, keeping leading dots in the stem
fn stem_and_ext(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => (&name[..leading + idx], &name[leading + idx + 1..]),
        None => (name, ""),
    }
}

fn render(segments: &[Segment], dest: &str, options: &MappingOptions) -> String {
    let (dir, name) = path::split_file_name(dest);
    let (stem, ext) = stem_and_ext(name);
    let mut out = String::with_capacity(dest.len() + 16);

    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(key) => match key.as_str() {
                "dest" => out.push_str(dest),
                "dir" => out.push_str(dir.trim_end_matches('/')),
                "name" => out.push_str(name),
                "stem" => out.push_str(stem),
                "ext" => out.push_str(ext),
                custom => {
                    if let Some(value) = options.extra(custom) {
                        out.push_str(&extra_text(value));
                    }
                }
            },
        }
    }

    out
}

/// Compile `template` into a rename hook
///
/// Custom placeholders must name a value present in `options.extras`.
pub fn compile(template: &str, options: &MappingOptions) -> Result<RenameFn, CliError> {
    let segments = parse(template)?;

    for segment in &segments {
        if let Segment::Placeholder(key) = segment {
            if !BUILTINS.contains(&key.as_str()) && options.extra(key).is_none() {
                return Err(CliError::InvalidTemplate(format!(
                    "unknown placeholder {{{key}}} (define it in the config file or with --set)"
                )));
            }
        }
    }

    log::debug!("compiled rename template {template:?}");
    Ok(Arc::new(move |dest: &str, options: &MappingOptions| {
        render(&segments, dest, options)
    }))
}
