//! linefind: find, navigate and replace in line-oriented text buffers.
//!
//! The engine lives in the workspace crates; this crate hosts it in an
//! [`EditSession`] and exposes a small command line front end.

pub mod cli;
pub mod session;

pub use session::EditSession;
