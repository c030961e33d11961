//! Mapping configuration
//!
//! [`MappingOptions`] carries the recognized transformation options plus an
//! open bag of caller-defined values. The bag is never interpreted by the
//! core; it exists so custom rename hooks can read their own settings.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Rename hook invoked as the last mapping step
///
/// Receives the destination computed so far and the full options. Its return
/// value is used verbatim.
pub type RenameFn = Arc<dyn Fn(&str, &MappingOptions) -> String + Send + Sync>;

/// Which dot in a file name starts the extension replaced by `ext`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtDot {
    /// Everything from the first dot onward is the extension
    #[default]
    First,
    /// Only the part after the last dot is the extension
    Last,
}

impl ExtDot {
    /// Parse a policy name, falling back to [`ExtDot::First`] for anything
    /// unrecognized
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(value, "unrecognized extDot, using \"first\"");
            ExtDot::First
        })
    }

    /// Policy name as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtDot::First => "first",
            ExtDot::Last => "last",
        }
    }
}

impl FromStr for ExtDot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(ExtDot::First),
            "last" => Ok(ExtDot::Last),
            other => Err(CoreError::configuration(format!(
                "extDot must be \"first\" or \"last\", got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for ExtDot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lenient_ext_dot<'de, D>(deserializer: D) -> std::result::Result<ExtDot, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(name)) => ExtDot::parse_lenient(&name),
        Some(Value::Null) | None => ExtDot::First,
        Some(other) => {
            tracing::warn!(value = %other, "extDot is not a string, using \"first\"");
            ExtDot::First
        }
    })
}

/// Options controlling how a source path becomes a destination path
///
/// Every option is independent; the default value maps each source to
/// itself.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingOptions {
    /// Prefix joined onto every `src` entry; never part of the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_base: Option<String>,

    /// Prefix joined onto every destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_base: Option<String>,

    /// Reduce destinations to their final path segment
    #[serde(default)]
    pub flatten: bool,

    /// Replacement extension, including its leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,

    /// Extension split policy used with `ext`
    #[serde(default, deserialize_with = "lenient_ext_dot")]
    pub ext_dot: ExtDot,

    /// Final override of the computed destination
    #[serde(skip)]
    pub rename: Option<RenameFn>,

    /// Caller-defined values passed through to `rename`
    #[serde(flatten)]
    pub extras: BTreeMap<String, Value>,
}

impl fmt::Debug for MappingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingOptions")
            .field("src_base", &self.src_base)
            .field("dest_base", &self.dest_base)
            .field("flatten", &self.flatten)
            .field("ext", &self.ext)
            .field("ext_dot", &self.ext_dot)
            .field("rename", &self.rename.as_ref().map(|_| "<fn>"))
            .field("extras", &self.extras)
            .finish()
    }
}

impl MappingOptions {
    /// Options that map every source to itself
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from loose structured data
    ///
    /// Keys use the camelCase names `srcBase`, `destBase`, `flatten`, `ext`
    /// and `extDot`; every other key lands in [`MappingOptions::extras`].
    /// `null` yields the defaults.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(CoreError::configuration(format!(
                    "options must be an object, got {other}"
                )))
            }
        };

        if map.contains_key("rename") {
            return Err(CoreError::configuration(
                "rename must be a function and cannot be read from data; use MappingOptions::with_rename",
            ));
        }

        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Set the source base path
    pub fn with_src_base(mut self, base: impl Into<String>) -> Self {
        self.src_base = Some(base.into());
        self
    }

    /// Set the destination base path
    pub fn with_dest_base(mut self, base: impl Into<String>) -> Self {
        self.dest_base = Some(base.into());
        self
    }

    /// Enable or disable flattening
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Set the replacement extension
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Set the extension split policy
    pub fn with_ext_dot(mut self, ext_dot: ExtDot) -> Self {
        self.ext_dot = ext_dot;
        self
    }

    /// Install a rename hook
    pub fn with_rename<F>(mut self, rename: F) -> Self
    where
        F: Fn(&str, &MappingOptions) -> String + Send + Sync + 'static,
    {
        self.rename = Some(Arc::new(rename));
        self
    }

    /// Add a caller-defined value
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Look up a caller-defined value
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Look up a caller-defined string value
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }
}
