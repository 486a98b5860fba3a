use anyhow::{Context, Result};
use ropey::Rope;
use std::path::{Path, PathBuf};

use crate::{LineBuffer, LineEnding, Position};

/// Text buffer based on Rope for efficient work with large files
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Rope structure for storing text
    rope: Rope,
    /// File path (if exists)
    file_path: Option<PathBuf>,
    /// Modified flag
    modified: bool,
    /// Line ending detected in the current text
    line_ending: LineEnding,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            file_path: None,
            modified: false,
            line_ending: LineEnding::LF,
        }
    }

    /// Create buffer from in-memory text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            file_path: None,
            modified: false,
            line_ending: detect_line_ending(text),
        }
    }

    /// Create buffer from a list of lines joined with `\n`
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&text)
    }

    /// Load file.
    ///
    /// Content that is not valid UTF-8 is decoded as Latin-1, so any file
    /// can be opened.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let contents = match String::from_utf8(bytes) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!(
                    "File is not valid UTF-8, decoding as Latin-1: {}",
                    path.display()
                );
                e.into_bytes().iter().map(|&b| char::from(b)).collect()
            }
        };

        let mut buffer = Self::from_text(&contents);
        buffer.file_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Save file
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = self.file_path.clone() {
            self.save_to(&path)
        } else {
            anyhow::bail!("No file path set")
        }
    }

    /// Save to specified file.
    ///
    /// Line separators are stored in the rope as they were loaded, so the
    /// text is written verbatim.
    pub fn save_to<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.rope.to_string())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.line_ending = detect_line_ending(text);
        self.modified = true;
    }

    /// Validate a position without clamping it
    pub fn checked_position(&self, pos: Position) -> Result<Position> {
        if pos.row >= self.line_count() {
            anyhow::bail!(
                "Line {} out of range (document has {} lines)",
                pos.row,
                self.line_count()
            );
        }
        let len = self.line_len(pos.row);
        if pos.column > len {
            anyhow::bail!(
                "Column {} out of range (line {} has {} chars)",
                pos.column,
                pos.row,
                len
            );
        }
        Ok(pos)
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Line ending detected in the current text
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

impl LineBuffer for TextBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_text(&self, row: usize) -> Option<String> {
        if row < self.line_count() {
            let line = self.rope.line(row).to_string();
            Some(strip_line_break(&line).to_string())
        } else {
            None
        }
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn row_col_to_offset(&self, pos: Position) -> usize {
        let pos = self.clamp_position(pos);
        self.rope.line_to_char(pos.row) + pos.column
    }

    fn offset_to_row_col(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(row);
        // Offsets inside a CRLF pair land on the end of the line
        Position::new(row, column.min(self.line_len(row)))
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_line_ending(text: &str) -> LineEnding {
    if text.contains("\r\n") {
        LineEnding::CRLF
    } else {
        LineEnding::LF
    }
}

/// Single-char line breaks recognized by ropey
const LINE_BREAKS: [char; 7] = ['\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}'];

/// Remove the terminator ropey includes at the end of a line
fn strip_line_break(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    line.strip_suffix(&LINE_BREAKS[..]).unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1); // Rope always has at least 1 line
        assert_eq!(buf.line_text(0).unwrap(), "");
        assert!(!buf.is_modified());
    }

    #[test]
    fn test_line_text_excludes_terminator() {
        let buf = TextBuffer::from_text("alpha\r\nbeta\ngamma");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_text(0).unwrap(), "alpha");
        assert_eq!(buf.line_text(1).unwrap(), "beta");
        assert_eq!(buf.line_text(2).unwrap(), "gamma");
        assert_eq!(buf.line_text(3), None);
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_ending(), LineEnding::CRLF);
    }

    #[test]
    fn test_offset_conversion() {
        let buf = TextBuffer::from_lines(&["alpha beta", "beta gamma", "gamma alpha"]);

        assert_eq!(buf.row_col_to_offset(Position::new(0, 0)), 0);
        assert_eq!(buf.row_col_to_offset(Position::new(1, 5)), 16);
        assert_eq!(buf.offset_to_row_col(16), Position::new(1, 5));
        assert_eq!(buf.offset_to_row_col(22), Position::new(2, 0));

        // Past the end maps to the end of the document
        assert_eq!(buf.offset_to_row_col(1000), Position::new(2, 11));
    }

    #[test]
    fn test_offset_conversion_unicode() {
        let buf = TextBuffer::from_text("héllo\nwörld");
        assert_eq!(buf.row_col_to_offset(Position::new(1, 1)), 7);
        assert_eq!(buf.offset_to_row_col(7), Position::new(1, 1));
    }

    #[test]
    fn test_offset_inside_crlf() {
        let buf = TextBuffer::from_text("ab\r\ncd");
        // Offset 3 is the '\n' of the CRLF pair
        assert_eq!(buf.offset_to_row_col(3), Position::new(0, 2));
        assert_eq!(buf.row_col_to_offset(Position::new(1, 0)), 4);
    }

    #[test]
    fn test_clamp_position() {
        let buf = TextBuffer::from_lines(&["one", "three"]);
        assert_eq!(buf.clamp_position(Position::new(0, 10)), Position::new(0, 3));
        assert_eq!(buf.clamp_position(Position::new(5, 1)), Position::new(1, 1));
        assert_eq!(buf.clamp_position(Position::new(9, 9)), Position::new(1, 5));
    }

    #[test]
    fn test_checked_position() {
        let buf = TextBuffer::from_lines(&["one", "three"]);
        assert!(buf.checked_position(Position::new(1, 5)).is_ok());
        assert!(buf.checked_position(Position::new(1, 6)).is_err());
        assert!(buf.checked_position(Position::new(2, 0)).is_err());
    }

    #[test]
    fn test_set_text_marks_modified() {
        let mut buf = TextBuffer::from_text("a a a");
        buf.set_text("b b b");
        assert!(buf.is_modified());
        assert_eq!(buf.text(), "b b b");
    }

    #[test]
    fn test_set_text_detects_line_ending() {
        let mut buf = TextBuffer::from_text("a\nb");
        assert_eq!(buf.line_ending(), LineEnding::LF);

        buf.set_text("a\r\nb");
        assert_eq!(buf.line_ending(), LineEnding::CRLF);

        buf.set_text("a b");
        assert_eq!(buf.line_ending(), LineEnding::LF);
    }

    #[test]
    fn test_save_load_cycle() {
        use std::fs;
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        let mut buf = TextBuffer::from_text("line 1\r\nline 2\r\nline 3");
        buf.save_to(temp_path).unwrap();
        assert!(!buf.is_modified());

        let saved_content = fs::read_to_string(temp_path).unwrap();
        assert_eq!(saved_content, "line 1\r\nline 2\r\nline 3");

        let buf2 = TextBuffer::from_file(temp_path).unwrap();
        assert_eq!(buf2.text(), saved_content);
        assert_eq!(buf2.line_ending(), LineEnding::CRLF);
        assert_eq!(buf2.file_path(), Some(temp_path));
    }

    #[test]
    fn test_load_latin1_fallback() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        // "café" in Latin-1
        temp_file.write_all(&[b'c', b'a', b'f', 0xE9]).unwrap();

        let buf = TextBuffer::from_file(temp_file.path()).unwrap();
        assert_eq!(buf.text(), "café");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut buf = TextBuffer::from_text("x");
        assert!(buf.save().is_err());
    }
}
