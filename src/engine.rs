//! Playback engine: the single owned audio output and its notifications.
//!
//! `PlaybackEngine` is the only handle to the output. Commands go out through
//! the `AudioOutput` seam; lifecycle notifications come back over a channel,
//! each stamped with the load `Generation` it belongs to.

mod driver;
mod output;
mod player;
mod settle;
mod source;
mod thread;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use driver::PlaybackEngine;
pub use output::AudioOutput;
pub use player::RodioOutput;
pub use types::*;
