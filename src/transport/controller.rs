use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Track};
use crate::engine::{AudioOutput, EngineEvent, EngineEventKind, Generation, PlaybackEngine};
use crate::error::PlaybackError;
use crate::playback::{PlaybackState, PlayerStatus, Store};

use super::notify::{FailureNotifier, PlaybackFailure};

/// The only caller of engine operations for a mounted player.
///
/// `is_playing` follows confirmed outcomes: it turns true on `PlayResolved`,
/// false on `PlayRejected` or pause, and a track switch leaves it alone.
pub struct TransportController<O: AudioOutput, N: FailureNotifier> {
    catalog: Catalog,
    engine: PlaybackEngine<O>,
    store: Store,
    notifier: N,
    /// Generation of a play request that has not settled yet.
    awaiting_play: Option<Generation>,
}

impl<O: AudioOutput, N: FailureNotifier> TransportController<O, N> {
    /// Cue the first catalog track without playing it.
    pub fn mount(
        catalog: Catalog,
        engine: PlaybackEngine<O>,
        notifier: N,
        initial_volume: u8,
    ) -> Self {
        let first = catalog.first().clone();
        let mut this = Self {
            store: Store::new(first.clone(), initial_volume),
            catalog,
            engine,
            notifier,
            awaiting_play: None,
        };
        this.engine.set_volume(this.store.state().volume_percent);
        this.begin(first);
        this
    }

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn toggle_play_pause(&mut self) {
        if self.engine.is_released() {
            return;
        }

        if self.store.state().status == PlayerStatus::Errored {
            let track = self.store.state().current_track.clone();
            info!(track = track.id, "retrying {}", track.title);
            self.begin(track);
            self.request_play();
        } else if self.awaiting_play.take().is_some() {
            debug!("pending play cancelled");
            self.engine.pause();
            self.store.mark_paused();
        } else if self.store.state().is_playing {
            self.engine.pause();
            self.store.mark_paused();
        } else {
            self.store.set_status(PlayerStatus::Loading);
            self.request_play();
        }
    }

    /// Switch to `track` and play it. Tracks outside the catalog are ignored.
    pub fn select_track(&mut self, track: &Track) {
        if self.engine.is_released() {
            return;
        }
        let Some(track) = self.catalog.get(track.id).cloned() else {
            warn!(track = track.id, "ignoring selection of unknown track");
            return;
        };

        info!(track = track.id, "selected {}", track.title);
        self.engine.set_volume(self.store.state().volume_percent);
        self.begin(track);
        self.request_play();
    }

    pub fn next_track(&mut self) {
        let next = self
            .catalog
            .next_after(self.store.state().current_track.id)
            .clone();
        self.select_track(&next);
    }

    pub fn previous_track(&mut self) {
        let prev = self
            .catalog
            .prev_before(self.store.state().current_track.id)
            .clone();
        self.select_track(&prev);
    }

    /// Jump to `percent` of the current track.
    pub fn seek(&mut self, percent: f64) {
        let duration = self.engine.duration_secs();
        if !percent.is_finite() {
            debug!(percent, "seek ignored, bad position");
            return;
        }
        let secs = percent.clamp(0.0, 100.0) / 100.0 * duration;
        match self.engine.seek(secs) {
            Ok(()) => self.store.set_time(secs),
            Err(e) => debug!("seek ignored: {e}"),
        }
    }

    pub fn set_volume(&mut self, percent: i32) {
        let percent = percent.clamp(0, 100) as u8;
        self.store.set_volume(percent);
        self.engine.set_volume(percent);
    }

    pub fn on_track_ended(&mut self) {
        self.next_track();
    }

    /// Apply every notification posted by the engine since the last call.
    pub fn pump(&mut self) {
        for event in self.engine.drain() {
            match self.store.check_current(event.generation) {
                Ok(()) => self.apply(event),
                Err(e) => debug!("discarding {:?}: {e}", event.kind),
            }
        }
    }

    /// Stop audio and free the output. Later commands do nothing.
    pub fn release(&mut self) {
        self.awaiting_play = None;
        self.engine.release();
    }

    fn begin(&mut self, track: Track) {
        self.store.begin_track(track.clone());
        let generation = self.engine.load(&track);
        self.store.accept_generation(generation);
    }

    fn request_play(&mut self) {
        let generation = self.engine.play();
        self.awaiting_play = Some(generation);
    }

    fn is_awaiting(&self, generation: Generation) -> bool {
        self.awaiting_play == Some(generation)
    }

    fn apply(&mut self, event: EngineEvent) {
        let generation = event.generation;
        match event.kind {
            EngineEventKind::MetadataReady { duration_secs } => {
                self.store.set_duration(duration_secs);
                if self.store.state().status == PlayerStatus::Loading
                    && self.awaiting_play.is_none()
                {
                    self.store.set_status(PlayerStatus::Paused);
                }
            }
            EngineEventKind::TimeUpdate { current_secs, .. } => {
                self.store.set_time(current_secs);
            }
            EngineEventKind::Ended => {
                debug!(%generation, "track ended");
                self.on_track_ended();
            }
            EngineEventKind::Error { reason } => {
                if self.is_awaiting(generation) {
                    // Reported through the rejection that follows.
                    debug!(%generation, "load failed with play pending: {reason}");
                } else if self.store.state().is_playing {
                    self.fail(reason);
                } else {
                    warn!(%generation, "track failed to load: {reason}");
                    self.store.mark_failed();
                }
            }
            EngineEventKind::PlayResolved => {
                if self.is_awaiting(generation) {
                    self.awaiting_play = None;
                    self.store.mark_playing();
                } else {
                    debug!(%generation, "play settled after being cancelled");
                }
            }
            EngineEventKind::PlayRejected { reason } => {
                if self.is_awaiting(generation) {
                    self.awaiting_play = None;
                    self.fail(reason);
                } else {
                    debug!(%generation, "rejection for a cancelled play: {reason}");
                }
            }
        }
    }

    fn fail(&mut self, reason: String) {
        let track_id = self.store.state().current_track.id;
        warn!(track = track_id, "{}", PlaybackError::Rejected(reason.clone()));
        self.store.mark_failed();
        self.notifier.notify(PlaybackFailure { track_id, reason });
    }
}
