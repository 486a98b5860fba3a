//! Line-oriented text buffer for linefind.
//!
//! Provides the [`LineBuffer`] interface the search engine reads through,
//! a rope-backed [`TextBuffer`] implementing it, and the [`Position`] type
//! shared by every crate in the workspace.

mod buffer;
mod position;

pub use buffer::TextBuffer;
pub use position::Position;

/// Line ending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}

/// Random-access view of a document as a sequence of lines.
///
/// Columns and flat offsets are counted in chars. `line_text` never
/// includes the line terminator, so a valid column for `row` lies in
/// `0..=line_len(row)`.
pub trait LineBuffer {
    /// Number of lines (always at least 1)
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator, `None` when out of range
    fn line_text(&self, row: usize) -> Option<String>;

    /// Line length in chars (without terminator), 0 when out of range
    fn line_len(&self, row: usize) -> usize {
        self.line_text(row).map_or(0, |line| line.chars().count())
    }

    /// Whole document as one flat string
    fn text(&self) -> String;

    /// Convert a row/column pair to a flat char offset.
    ///
    /// The position is clamped first, so this never fails.
    fn row_col_to_offset(&self, pos: Position) -> usize;

    /// Convert a flat char offset to a row/column pair.
    ///
    /// Offsets past the end map to the end of the document.
    fn offset_to_row_col(&self, offset: usize) -> Position;

    /// Clamp a position so that row < line_count and column <= line length
    fn clamp_position(&self, pos: Position) -> Position {
        let row = pos.row.min(self.line_count().saturating_sub(1));
        Position::new(row, pos.column.min(self.line_len(row)))
    }
}
