//! Editing session that hosts the search engine.
//!
//! Owns the buffer, the cursor and the active search, and turns engine
//! results into cursor moves, a status line and feedback signals.

use linefind_buffer::{LineBuffer, Position, TextBuffer};
use linefind_text_search::{
    find_from_with, replace_all, replace_next, Feedback, FindResult, NotificationSink, NullSink,
    Pattern, SearchDirection, SearchFlags, SearchOptions, SearchState,
};

/// One open document with its find/replace state
pub struct EditSession {
    buffer: TextBuffer,
    cursor: Position,
    /// Active search (replaced by every new find)
    search: Option<SearchState>,
    options: SearchOptions,
    sink: Box<dyn NotificationSink>,
    /// Last status line shown to the user
    status: Option<String>,
}

impl EditSession {
    /// Create a session with the cursor at the start of the document
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            search: None,
            options: SearchOptions::default(),
            sink: Box::new(NullSink),
            status: None,
        }
    }

    /// Use a host-provided feedback sink
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamped into the document
    pub fn set_cursor(&mut self, pos: Position) -> Position {
        self.cursor = self.buffer.clamp_position(pos);
        self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn search_state(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// Start a new search from the cursor
    pub fn start_find(
        &mut self,
        query: &str,
        flags: SearchFlags,
        direction: SearchDirection,
    ) -> FindResult {
        let pattern = Pattern::compile(query, flags);
        self.search = Some(SearchState::new(pattern, direction, self.cursor));
        self.run_find(self.cursor, false)
    }

    /// Repeat the search in its original direction
    pub fn find_next(&mut self) -> FindResult {
        self.repeat_find(false)
    }

    /// Repeat the search in the opposite direction
    pub fn find_previous(&mut self) -> FindResult {
        self.repeat_find(true)
    }

    fn repeat_find(&mut self, reverse: bool) -> FindResult {
        match self.search.as_ref().map(SearchState::last_match) {
            Some(anchor) => self.run_find(anchor, reverse),
            None => {
                self.sink.notify(Feedback::NotFound);
                FindResult::NotFound
            }
        }
    }

    fn run_find(&mut self, start: Position, reverse: bool) -> FindResult {
        let Some(state) = self.search.as_mut() else {
            return FindResult::NotFound;
        };

        // The document may have changed since the anchor was recorded
        let start = self.buffer.clamp_position(start);
        let result = find_from_with(&self.buffer, state, start, reverse, &self.options);

        if let FindResult::Found(pos) = result {
            self.cursor = pos;
            self.status = result.status_message();
        }
        self.sink.notify(Feedback::from(result));
        result
    }

    /// Replace every match in the document, returning the count.
    ///
    /// The cursor keeps its raw flat offset, clamped to the new text.
    pub fn replace_all(&mut self, query: &str, replacement: &str, flags: SearchFlags) -> usize {
        let pattern = Pattern::compile(query, flags);
        let offset = self.buffer.row_col_to_offset(self.cursor);
        let outcome = replace_all(&pattern, replacement, offset, &self.buffer.text());

        if outcome.replacements > 0 {
            self.buffer.set_text(&outcome.text);
        }
        self.cursor = self.buffer.offset_to_row_col(outcome.offset);

        log::info!(
            "Replace all '{}' -> '{}': {} replacement(s)",
            query,
            replacement,
            outcome.replacements
        );
        outcome.replacements
    }

    /// Replace the current match only. Reserved, currently a no-op.
    pub fn replace_next(&mut self, replacement: &str) {
        if let Some(state) = self.search.as_ref() {
            replace_next(state, replacement);
        }
    }
}
