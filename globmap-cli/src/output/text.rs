//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use globmap_core::MappingEntry;
use std::io::Write;

/// Plain text formatter - outputs one `dest <- src, ...` line per entry
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_entry(&mut self, entry: &MappingEntry) -> Result<()> {
        writeln!(self.writer, "{} <- {}", entry.dest, entry.src.join(", "))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
