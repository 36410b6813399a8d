use std::sync::mpsc::Sender;

use tracing::debug;

/// User-visible report that a track could not be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFailure {
    pub track_id: u32,
    pub reason: String,
}

/// Sink for playback failures, e.g. a toast in the front-end.
pub trait FailureNotifier {
    fn notify(&self, failure: PlaybackFailure);
}

impl FailureNotifier for Sender<PlaybackFailure> {
    fn notify(&self, failure: PlaybackFailure) {
        if self.send(failure).is_err() {
            debug!("failure notification dropped, receiver gone");
        }
    }
}
