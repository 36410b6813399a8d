//! Track catalog: the immutable, ordered list of playable tracks.
//!
//! The catalog is supplied at startup (built-in data or a TOML file) and is
//! only ever read by the player core.

mod builtin;
mod load;
mod model;

pub use model::*;
