//! Document-wide substitution.

use crate::engine::SearchState;
use crate::pattern::Pattern;

/// Result of a replace-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Document text after substitution
    pub text: String,
    /// Cursor offset to restore, clamped to the new text
    pub offset: usize,
    /// Number of substitutions made
    pub replacements: usize,
}

/// Replace every non-overlapping match in `text` with `replacement`.
///
/// The replacement is inserted literally (no `$1` expansion). The caller's
/// flat `offset` is not remapped through the edits: it is kept as the same
/// raw char index, clamped to the length of the new text.
pub fn replace_all(
    pattern: &Pattern,
    replacement: &str,
    offset: usize,
    text: &str,
) -> ReplaceOutcome {
    let mut new_text = String::with_capacity(text.len());
    let mut replacements = 0;
    let mut last = 0;

    // Same matches the search engine stops on: zero-width hits are skipped
    for m in pattern.non_empty_matches(text) {
        new_text.push_str(&text[last..m.start()]);
        new_text.push_str(replacement);
        last = m.end();
        replacements += 1;
    }
    new_text.push_str(&text[last..]);

    let offset = offset.min(new_text.chars().count());

    log::debug!("Replaced {} occurrence(s)", replacements);

    ReplaceOutcome {
        text: new_text,
        offset,
        replacements,
    }
}

/// Replace only the current match.
///
/// Reserved: currently does nothing.
pub fn replace_next(_state: &SearchState, _replacement: &str) {}
