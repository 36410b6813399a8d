//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` struct holds what only the terminal view cares about: the
//! category filter, the list cursor and the failure toast. Playback state
//! lives in the transport controller.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
