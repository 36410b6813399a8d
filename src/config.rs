//! Configuration loader and schema types.
//!
//! Settings drive the player's defaults (volume, steps), the audio thread's
//! timings, the catalog source, the terminal view and logging.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
