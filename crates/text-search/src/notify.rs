//! Found/not-found feedback hooks.
//!
//! The engine never performs I/O. A host that wants an audible or visual
//! cue implements [`NotificationSink`] and feeds it the [`Feedback`] of each
//! search call.

use crate::engine::FindResult;

/// Signal emitted after a search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Found,
    NotFound,
}

impl Feedback {
    /// Suggested beep as (frequency in Hz, duration in ms)
    pub fn tone(self) -> (u32, u32) {
        match self {
            Feedback::Found => (1000, 250),
            Feedback::NotFound => (500, 500),
        }
    }
}

impl From<FindResult> for Feedback {
    fn from(result: FindResult) -> Self {
        match result {
            FindResult::Found(_) => Feedback::Found,
            FindResult::NotFound => Feedback::NotFound,
        }
    }
}

/// Receiver for search feedback supplied by the host
pub trait NotificationSink {
    fn notify(&mut self, feedback: Feedback);
}

/// Sink that ignores every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _feedback: Feedback) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use linefind_buffer::Position;

    #[test]
    fn test_feedback_from_result() {
        assert_eq!(
            Feedback::from(FindResult::Found(Position::new(1, 2))),
            Feedback::Found
        );
        assert_eq!(Feedback::from(FindResult::NotFound), Feedback::NotFound);
    }

    #[test]
    fn test_tones_differ() {
        assert_ne!(Feedback::Found.tone(), Feedback::NotFound.tone());
    }
}
