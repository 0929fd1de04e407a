//! JSON output formatter

use super::{OutputFormatter, ProcessedFile};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Collects every file and writes them as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    files: Vec<FileData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct FileData {
    /// Input path as given on the command line
    pub file: String,
    /// The processed text
    pub text: String,
    /// Language actually used, after fallback
    pub language: Option<String>,
    pub mode: String,
    pub is_html: bool,
    pub bytes_in: usize,
    pub bytes_out: usize,
    pub words: usize,
    pub words_hyphenated: usize,
    pub duration_ms: f64,
}

impl From<&ProcessedFile> for FileData {
    fn from(file: &ProcessedFile) -> Self {
        let metadata = &file.output.metadata;
        Self {
            file: file.path.display().to_string(),
            text: file.output.text.clone(),
            language: metadata.language.clone(),
            mode: metadata.mode.to_string(),
            is_html: metadata.is_html,
            bytes_in: metadata.stats.bytes_in,
            bytes_out: metadata.stats.bytes_out,
            words: metadata.stats.words,
            words_hyphenated: metadata.stats.words_hyphenated,
            duration_ms: metadata.duration.as_secs_f64() * 1000.0,
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            files: Vec::new(),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_file(&mut self, file: &ProcessedFile) -> Result<()> {
        self.files.push(FileData::from(file));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.files)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use typokit_core::{Input, Typographer};

    #[test]
    fn test_json_array_with_metadata() {
        let typographer = Typographer::new().unwrap();
        let file = ProcessedFile {
            path: PathBuf::from("page.html"),
            output: typographer
                .process(Input::from_text("<p>\"Hi\"</p>"))
                .unwrap(),
        };

        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_file(&file).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        let parsed: Vec<FileData> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].file, "page.html");
        assert_eq!(parsed[0].text, "<p>&ldquo;Hi&rdquo;</p>");
        assert_eq!(parsed[0].language.as_deref(), Some("en"));
        assert_eq!(parsed[0].mode, "both");
        assert!(parsed[0].is_html);
    }

    #[test]
    fn test_empty_input_is_empty_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.into_inner()).unwrap(), "[]\n");
    }
}
