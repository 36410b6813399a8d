use std::time::Duration;

use super::types::Generation;

/// The native audio output behind the engine.
///
/// Implementations never block on I/O: `load` and `play` only start work,
/// and their outcome is reported through `EngineEvent`s stamped with the
/// given generation.
pub trait AudioOutput {
    /// Replace the current source with `source`, tagging its notifications with `generation`.
    fn load(&mut self, generation: Generation, source: &str);
    /// Request playback of the load tagged `generation`.
    fn play(&mut self, generation: Generation);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// Linear gain in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);
    /// Stop playback and free the device. Called at most once.
    fn shutdown(&mut self);
}
