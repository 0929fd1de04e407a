//! Plain text output formatter

use super::{OutputFormatter, ProcessedFile};
use anyhow::Result;
use std::io::{self, Write};

/// Writes the processed text of each file as is
///
/// Consecutive documents are separated by a newline when the previous one
/// does not already end with one.
pub struct TextFormatter<W: Write> {
    writer: W,
    needs_separator: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            needs_separator: false,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_file(&mut self, file: &ProcessedFile) -> Result<()> {
        if self.needs_separator {
            writeln!(self.writer)?;
        }
        let text = &file.output.text;
        self.writer.write_all(text.as_bytes())?;
        self.needs_separator = !text.is_empty() && !text.ends_with('\n');
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.needs_separator {
            writeln!(self.writer)?;
            self.needs_separator = false;
        }
        self.writer.flush()?;
        Ok(())
    }
}
