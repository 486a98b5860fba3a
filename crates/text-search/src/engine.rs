//! Directional find over a [`LineBuffer`].
//!
//! A search remembers where it last matched; find-next and find-previous
//! continue from there. Neither direction wraps around the document unless
//! [`SearchOptions::wrap_around`] is set.

use linefind_buffer::{LineBuffer, Position};

use crate::pattern::Pattern;

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

impl SearchDirection {
    /// The opposite direction
    pub fn opposite(self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Backward,
            SearchDirection::Backward => SearchDirection::Forward,
        }
    }

    /// Effective direction once a "previous" request is applied
    pub fn resolve(self, reverse: bool) -> Self {
        if reverse {
            self.opposite()
        } else {
            self
        }
    }
}

impl std::str::FromStr for SearchDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "down" => Ok(SearchDirection::Forward),
            "backward" | "up" => Ok(SearchDirection::Backward),
            _ => Err(format!("Unknown search direction: {}", s)),
        }
    }
}

/// Scan behaviour that is not part of the pattern itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Continue from the other end of the document when a scan runs out
    pub wrap_around: bool,
}

/// Search state owned by the editing session.
///
/// Lives from the moment a search is started until a new one replaces it.
#[derive(Debug, Clone)]
pub struct SearchState {
    pattern: Pattern,
    base_direction: SearchDirection,
    last_match: Position,
}

impl SearchState {
    /// Start a search anchored at `anchor` (usually the cursor)
    pub fn new(pattern: Pattern, base_direction: SearchDirection, anchor: Position) -> Self {
        Self {
            pattern,
            base_direction,
            last_match: anchor,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Direction chosen when the search began
    pub fn base_direction(&self) -> SearchDirection {
        self.base_direction
    }

    /// Anchor for the next find-next/find-previous
    pub fn last_match(&self) -> Position {
        self.last_match
    }
}

/// Outcome of one find call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    Found(Position),
    NotFound,
}

impl FindResult {
    pub fn is_found(&self) -> bool {
        matches!(self, FindResult::Found(_))
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            FindResult::Found(pos) => Some(*pos),
            FindResult::NotFound => None,
        }
    }

    /// Status line text for a successful move
    pub fn status_message(&self) -> Option<String> {
        self.position()
            .map(|pos| format!("Line {} Col {}", pos.row, pos.column))
    }
}

/// Find the next match from `start` without wrapping.
///
/// `start` must already be a valid position in `buffer`.
pub fn find_from<B: LineBuffer + ?Sized>(
    buffer: &B,
    state: &mut SearchState,
    start: Position,
    reverse: bool,
) -> FindResult {
    find_from_with(buffer, state, start, reverse, &SearchOptions::default())
}

/// Find the next match from `start`.
///
/// The effective direction is the state's base direction, inverted when
/// `reverse` is set. On success `state.last_match` moves to the hit; on
/// failure the state is left alone.
pub fn find_from_with<B: LineBuffer + ?Sized>(
    buffer: &B,
    state: &mut SearchState,
    start: Position,
    reverse: bool,
    options: &SearchOptions,
) -> FindResult {
    if state.pattern.is_empty() {
        return FindResult::NotFound;
    }

    let direction = state.base_direction.resolve(reverse);
    let hit = match direction {
        SearchDirection::Forward => scan_forward(buffer, &state.pattern, start, options),
        SearchDirection::Backward => scan_backward(buffer, &state.pattern, start, options),
    };

    match hit {
        Some(pos) => {
            log::debug!("Search hit at {} ({:?} from {})", pos, direction, start);
            state.last_match = pos;
            FindResult::Found(pos)
        }
        None => {
            log::debug!("Search exhausted ({:?} from {})", direction, start);
            FindResult::NotFound
        }
    }
}

fn scan_forward<B: LineBuffer + ?Sized>(
    buffer: &B,
    pattern: &Pattern,
    start: Position,
    options: &SearchOptions,
) -> Option<Position> {
    // Rest of the current line, strictly after the start column
    let line = buffer.line_text(start.row).unwrap_or_default();
    if let Some(column) = pattern.first_match_from(&line, start.column + 1) {
        return Some(Position::new(start.row, column));
    }

    let leftmost = |row: usize| {
        let line = buffer.line_text(row)?;
        pattern
            .first_match_from(&line, 0)
            .map(|column| Position::new(row, column))
    };

    if let Some(pos) = (start.row + 1..buffer.line_count()).find_map(leftmost) {
        return Some(pos);
    }

    if !options.wrap_around {
        return None;
    }

    // Top of the document back down to the start, which may match itself
    (0..=start.row)
        .find_map(leftmost)
        .filter(|pos| *pos <= start)
}

fn scan_backward<B: LineBuffer + ?Sized>(
    buffer: &B,
    pattern: &Pattern,
    start: Position,
    options: &SearchOptions,
) -> Option<Position> {
    // Prefix of the current line, strictly before the start column
    let line = buffer.line_text(start.row).unwrap_or_default();
    if let Some(column) = pattern.last_match_before(&line, start.column) {
        return Some(Position::new(start.row, column));
    }

    let rightmost = |row: usize| {
        let line = buffer.line_text(row)?;
        pattern
            .last_match_before(&line, usize::MAX)
            .map(|column| Position::new(row, column))
    };

    if let Some(pos) = (0..start.row).rev().find_map(rightmost) {
        return Some(pos);
    }

    if !options.wrap_around {
        return None;
    }

    // Bottom of the document back up to the start, which may match itself
    (start.row..buffer.line_count())
        .rev()
        .find_map(rightmost)
        .filter(|pos| *pos >= start)
}
