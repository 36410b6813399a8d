//! Playback state store: the single observable `PlaybackState`.
//!
//! Views only ever read from here. The transport controller is the only
//! writer, feeding it user commands and engine notifications.

mod state;

pub use state::*;
