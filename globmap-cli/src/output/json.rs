//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use globmap_core::MappingEntry;
use std::io::Write;

/// JSON formatter - outputs the mapping as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    entries: Vec<MappingEntry>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_entry(&mut self, entry: &MappingEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
