//! Configuration module
//!
//! A config file is TOML with the same camelCase keys the library accepts
//! (`src`, `srcBase`, `destBase`, `flatten`, `ext`, `extDot`, `filter`,
//! `matchBase`, `dot`), an optional `renameTemplate`, and any custom keys for
//! rename templates. Command-line flags override file values.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Key holding the rename template
pub const RENAME_TEMPLATE_KEY: &str = "renameTemplate";

/// Loose configuration values, file first, then overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigValues {
    values: Map<String, Value>,
}

impl ConfigValues {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        match serde_json::to_value(table)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(CliError::ConfigError(format!("expected a table, got {other}")).into()),
        }
    }

    /// Set a value, replacing what the file said
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Apply a `KEY=VALUE` override; the value is kept as a string
    pub fn set_pair(&mut self, pair: &str) -> Result<()> {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CliError::ConfigError(format!("--set expects KEY=VALUE, got {pair:?}")))?;
        self.set(key.trim(), value);
        Ok(())
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Remove and return the rename template
    pub fn take_rename_template(&mut self) -> Result<Option<String>> {
        match self.values.remove(RENAME_TEMPLATE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(template)) => Ok(Some(template)),
            Some(other) => Err(CliError::ConfigError(format!(
                "{RENAME_TEMPLATE_KEY} must be a string, got {other}"
            ))
            .into()),
        }
    }

    /// Convert into a JSON object for the library option parsers
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}
