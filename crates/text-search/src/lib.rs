//! Text search and replace for linefind.
//!
//! Compile a [`Pattern`] once, keep a [`SearchState`] in the editing
//! session, and call [`find_from`] for every find-next/find-previous.
//! [`replace_all`] works on the flattened document and is independent of
//! any search state.

mod engine;
mod error;
mod notify;
mod pattern;
mod replace;

pub use engine::{
    find_from, find_from_with, FindResult, SearchDirection, SearchOptions, SearchState,
};
pub use error::{SearchError, SearchResult};
pub use notify::{Feedback, NotificationSink, NullSink};
pub use pattern::{LineMatch, Pattern, SearchFlags};
pub use replace::{replace_all, replace_next, ReplaceOutcome};
