//! Pattern compilation and per-line matching.
//!
//! User input is always escaped, so the regex engine is an implementation
//! detail: callers only see literal text, case folding and whole-word
//! boundaries. All columns are char offsets within a single line.

use regex::{Regex, RegexBuilder};

use crate::error::{SearchError, SearchResult};

/// Matching flags chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchFlags {
    /// Case-sensitive search
    pub match_case: bool,
    /// Whole word only
    pub whole_word: bool,
}

impl SearchFlags {
    pub fn new(match_case: bool, whole_word: bool) -> Self {
        Self {
            match_case,
            whole_word,
        }
    }
}

/// A match inside one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {
    /// Column of the first matched char
    pub column: usize,
    /// Match length in chars
    pub len: usize,
}

/// Compiled, immutable matcher.
///
/// An empty search string compiles to a pattern that never matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
    flags: SearchFlags,
}

impl Pattern {
    /// Compile a literal search string. Never fails.
    pub fn compile(text: &str, flags: SearchFlags) -> Self {
        if text.is_empty() {
            return Self::never(flags);
        }

        match build_regex(&regex::escape(text), flags) {
            Ok(regex) => Self {
                regex: Some(regex),
                flags,
            },
            Err(e) => {
                // Only reachable when the escaped literal exceeds the regex size limit
                log::warn!("Search string could not be compiled, matching nothing: {}", e);
                Self::never(flags)
            }
        }
    }

    /// Compile raw regex syntax supplied by the user.
    pub fn compile_raw(syntax: &str, flags: SearchFlags) -> SearchResult<Self> {
        if syntax.is_empty() {
            return Ok(Self::never(flags));
        }

        let regex = build_regex(syntax, flags).map_err(|e| SearchError::InvalidPattern {
            pattern: syntax.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            regex: Some(regex),
            flags,
        })
    }

    /// Pattern that reports no match anywhere
    pub fn never(flags: SearchFlags) -> Self {
        Self { regex: None, flags }
    }

    /// Flags the pattern was compiled with
    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Check if the pattern can never match
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Check if the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.non_empty_matches(text).next().is_some()
    }

    /// All non-overlapping matches in a line, left to right
    pub fn find_all_in_line(&self, line: &str) -> Vec<LineMatch> {
        self.non_empty_matches(line)
            .map(|m| LineMatch {
                column: line[..m.start()].chars().count(),
                len: m.as_str().chars().count(),
            })
            .collect()
    }

    /// Leftmost match in the remainder of the line starting at `column`.
    ///
    /// Only the remainder is searched, so its first char counts as the
    /// start of the text for whole-word boundaries.
    pub fn first_match_from(&self, line: &str, column: usize) -> Option<usize> {
        let at = char_to_byte(line, column)?;
        let rest = &line[at..];

        self.non_empty_matches(rest)
            .next()
            .map(|m| column + rest[..m.start()].chars().count())
    }

    /// Rightmost match in the prefix of the line before `column`.
    ///
    /// The prefix ends the text for whole-word boundaries. A `column` past
    /// the end of the line means "anywhere in the line".
    pub fn last_match_before(&self, line: &str, column: usize) -> Option<usize> {
        let limit = char_to_byte(line, column).unwrap_or(line.len());
        let prefix = &line[..limit];

        self.non_empty_matches(prefix)
            .last()
            .map(|m| prefix[..m.start()].chars().count())
    }

    /// Matches with at least one char, left to right
    pub(crate) fn non_empty_matches<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = regex::Match<'a>> + 'a {
        self.regex
            .iter()
            .flat_map(move |regex| regex.find_iter(text))
            .filter(|m| !m.is_empty())
    }
}

fn build_regex(syntax: &str, flags: SearchFlags) -> Result<Regex, regex::Error> {
    // Half boundaries: no word char directly before the match or directly
    // after it, whatever the needle's own first and last chars are
    let syntax = if flags.whole_word {
        format!(r"\b{{start-half}}(?:{})\b{{end-half}}", syntax)
    } else {
        syntax.to_string()
    };

    RegexBuilder::new(&syntax)
        .case_insensitive(!flags.match_case)
        .build()
}

/// Byte index of char `column`, `None` when the line is shorter
fn char_to_byte(line: &str, column: usize) -> Option<usize> {
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}
