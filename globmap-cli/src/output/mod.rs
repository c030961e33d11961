//! Output formatting module

use anyhow::{Context, Result};
use globmap_core::{Mapping, MappingEntry};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single mapping entry
    fn format_entry(&mut self, entry: &MappingEntry) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;

    /// Format every entry of `mapping`, then finish
    fn write_mapping(&mut self, mapping: &Mapping) -> Result<()> {
        for entry in mapping {
            self.format_entry(entry)?;
        }
        self.finish()
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of `{ dest, src }` objects
    Json,
    /// One `dest <- src, ...` line per entry
    Text,
    /// Markdown numbered list
    Markdown,
}

/// Open the output sink: the given file, or stdout
pub fn open_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Build the formatter for `format` over `writer`
pub fn create_formatter<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
) -> Box<dyn OutputFormatter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}
