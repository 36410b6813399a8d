//! Engine-level small types: generations, notifications and audio-thread commands.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::SourceError;

/// Tag distinguishing successive loads. Every notification carries the
/// generation of the load it originated from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub(super) fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the output reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEventKind {
    /// Audio is decoded and its length is known.
    MetadataReady { duration_secs: f64 },
    /// Periodic position report while playing.
    TimeUpdate {
        current_secs: f64,
        progress_percent: f64,
    },
    /// The track played to its end.
    Ended,
    /// Loading or decoding failed.
    Error { reason: String },
    /// A play request took effect.
    PlayResolved,
    /// A play request failed or was superseded.
    PlayRejected { reason: String },
}

/// A notification stamped with its originating generation.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub generation: Generation,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    pub fn new(generation: Generation, kind: EngineEventKind) -> Self {
        Self { generation, kind }
    }
}

/// Commands understood by the audio thread.
#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Fetch and decode `source`, replacing whatever is loaded.
    Load {
        generation: Generation,
        source: String,
    },
    /// Start playback of `generation` once it is loaded.
    Play { generation: Generation },
    /// Pause, and drop any play still waiting for its load.
    Pause,
    /// Jump to an absolute position in the loaded track.
    Seek(Duration),
    /// Linear gain in `[0.0, 1.0]`.
    SetVolume(f32),
    /// Fade out over `fade_out_ms`, stop and exit the thread.
    Release { fade_out_ms: u64 },
    /// Fetch worker result, posted back to the audio thread.
    Fetched {
        generation: Generation,
        result: Result<Arc<[u8]>, SourceError>,
    },
}
