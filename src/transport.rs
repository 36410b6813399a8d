//! Transport controller: the command surface used by the views.
//!
//! Translates user intents (play/pause, select, next/previous, seek,
//! volume) into engine calls and store updates, and folds engine
//! notifications back into the store during `pump`.

mod controller;
mod notify;
mod time;

pub use controller::TransportController;
pub use notify::{FailureNotifier, PlaybackFailure};
pub use time::format_time;
