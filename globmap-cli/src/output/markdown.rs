//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use globmap_core::MappingEntry;
use std::io::Write;

/// Markdown formatter - outputs entries as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    entry_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entry_count: 0,
        }
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_entry(&mut self, entry: &MappingEntry) -> Result<()> {
        self.entry_count += 1;
        writeln!(self.writer, "{}. `{}`", self.entry_count, entry.dest)?;
        for src in &entry.src {
            writeln!(self.writer, "   - `{}`", src)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total entries: {}*", self.entry_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::sample_mapping;

    #[test]
    fn test_markdown_list_and_footer() {
        let mut buffer = Vec::new();
        MarkdownFormatter::new(&mut buffer)
            .write_mapping(&sample_mapping())
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("1. `build/all.css`\n   - `css/baz.css`\n"));
        assert!(output.contains("2. `build/all.js`\n   - `js/foo.js`\n"));
        assert!(output.ends_with("---\n*Total entries: 2*\n"));
    }
}
