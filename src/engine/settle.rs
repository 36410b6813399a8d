//! Which play requests and load results still count, and what the audio
//! thread reports when they settle. Holds no audio resources.

use super::types::{EngineEventKind, Generation};

const SUPERSEDED: &str = "superseded by a newer load";

/// Outcome of a play request against the current load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PlayDecision {
    /// Audio is ready; start the sink now.
    Start,
    /// Audio is still being fetched; start once it is installed.
    Park,
    /// Report `PlayRejected` with this reason.
    Reject(String),
}

#[derive(Debug, Default)]
pub(super) struct Settlement {
    /// Generation of the most recent `Load`; anything older is superseded.
    latest: Generation,
    /// Load failure for `latest`, kept so later plays reject immediately.
    failed: Option<(Generation, String)>,
    /// A play that arrived before its audio did.
    pending_play: Option<Generation>,
}

impl Settlement {
    pub(super) fn latest(&self) -> Generation {
        self.latest
    }

    /// A new load replaces everything tracked for the previous one.
    pub(super) fn begin_load(&mut self, generation: Generation) {
        self.latest = generation;
        self.failed = None;
        self.pending_play = None;
    }

    /// Whether a fetch result for `generation` should still be installed.
    pub(super) fn accepts(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    pub(super) fn play(&mut self, generation: Generation, loaded: bool) -> PlayDecision {
        if generation != self.latest {
            return PlayDecision::Reject(SUPERSEDED.to_string());
        }
        if let Some((_, reason)) = self.failed.as_ref().filter(|(g, _)| *g == generation) {
            return PlayDecision::Reject(reason.clone());
        }
        if loaded {
            PlayDecision::Start
        } else {
            self.pending_play = Some(generation);
            PlayDecision::Park
        }
    }

    /// Audio for `generation` is installed. Returns `true` when a parked play
    /// should start now.
    pub(super) fn installed(&mut self, generation: Generation) -> bool {
        if self.pending_play == Some(generation) {
            self.pending_play = None;
            true
        } else {
            false
        }
    }

    /// Loading `generation` failed. Returns what to emit, in order: the error,
    /// then a single rejection if a play was parked on it.
    pub(super) fn failed(
        &mut self,
        generation: Generation,
        reason: String,
    ) -> Vec<EngineEventKind> {
        let mut events = vec![EngineEventKind::Error {
            reason: reason.clone(),
        }];
        if self.pending_play == Some(generation) {
            self.pending_play = None;
            events.push(EngineEventKind::PlayRejected {
                reason: reason.clone(),
            });
        }
        self.failed = Some((generation, reason));
        events
    }

    /// Pause or release: a parked play no longer starts.
    pub(super) fn cancel_pending(&mut self) {
        self.pending_play = None;
    }
}
