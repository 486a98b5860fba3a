/// Result type for pattern compilation
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while building a pattern.
///
/// Searching and replacing never fail: "no match" is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
