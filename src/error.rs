//! Error types shared across the player.
//!
//! None of these are fatal to the process: playback errors are recovered by
//! the transport controller, source errors travel back as notification
//! reasons, and catalog/audio errors only matter at startup.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::Generation;

/// Outcomes of playback commands that did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The output refused to start playback (decode failure, network error, ...).
    #[error("playback rejected: {0}")]
    Rejected(String),
    /// A notification for a generation that is no longer active.
    #[error("stale notification from generation {got} (active: {active})")]
    Stale { got: Generation, active: Generation },
    /// A seek was requested before the track duration was known.
    #[error("seek requested before the track duration is known")]
    InvalidSeek,
}

/// Failures while fetching or decoding a track's audio source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("source {0} returned no audio data")]
    Empty(String),
    #[error("failed to decode audio: {0}")]
    Decode(String),
}

/// Problems with a track catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no tracks")]
    Empty,
    #[error("duplicate track id {0}")]
    DuplicateId(u32),
    #[error("track {id} has a malformed duration label {label:?} (expected M:SS)")]
    BadDurationLabel { id: u32, label: String },
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures bringing up the audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("audio thread exited before reporting readiness")]
    ThreadGone,
    #[error("failed to set up the HTTP client: {0}")]
    HttpClient(String),
}
