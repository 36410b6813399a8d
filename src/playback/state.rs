use crate::catalog::Track;
use crate::engine::Generation;
use crate::error::PlaybackError;

/// Where the player is in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// Mounted, nothing requested yet.
    #[default]
    Idle,
    /// A track is buffering or a play request is in flight.
    Loading,
    Playing,
    Paused,
    /// The last attempted operation failed; any retry leaves this state.
    Errored,
}

/// Snapshot read by the views.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Track,
    pub is_playing: bool,
    pub volume_percent: u8,
    pub progress_percent: f64,
    pub current_time_secs: f64,
    /// 0 until the engine reports metadata for the current track.
    pub duration_secs: f64,
    pub status: PlayerStatus,
    /// Generation whose notifications are accepted.
    pub generation: Generation,
}

/// `current / duration` as a percentage in `[0, 100]`; 0 while the duration
/// is unknown or either value is not finite.
pub fn progress_percent(current_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || !current_secs.is_finite() {
        return 0.0;
    }
    let p = current_secs / duration_secs * 100.0;
    if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 }
}

/// Owner of the one `PlaybackState` of a mounted player.
#[derive(Debug)]
pub struct Store {
    state: PlaybackState,
}

impl Store {
    pub fn new(first: Track, volume_percent: u8) -> Self {
        Self {
            state: PlaybackState {
                current_track: first,
                is_playing: false,
                volume_percent: volume_percent.min(100),
                progress_percent: 0.0,
                current_time_secs: 0.0,
                duration_secs: 0.0,
                status: PlayerStatus::Idle,
                generation: Generation::default(),
            },
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Accept a notification only if it belongs to the active generation.
    pub(crate) fn check_current(&self, generation: Generation) -> Result<(), PlaybackError> {
        if generation == self.state.generation {
            Ok(())
        } else {
            Err(PlaybackError::Stale {
                got: generation,
                active: self.state.generation,
            })
        }
    }

    /// Switch to `track`, zeroing progress before any of its audio is buffered.
    pub(crate) fn begin_track(&mut self, track: Track) {
        self.state.current_track = track;
        self.state.current_time_secs = 0.0;
        self.state.duration_secs = 0.0;
        self.state.progress_percent = 0.0;
        self.state.status = PlayerStatus::Loading;
    }

    pub(crate) fn accept_generation(&mut self, generation: Generation) {
        self.state.generation = generation;
    }

    pub(crate) fn set_duration(&mut self, secs: f64) {
        self.state.duration_secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
        self.recompute_progress();
    }

    pub(crate) fn set_time(&mut self, secs: f64) {
        self.state.current_time_secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.recompute_progress();
    }

    pub(crate) fn set_volume(&mut self, percent: u8) {
        self.state.volume_percent = percent.min(100);
    }

    pub(crate) fn set_status(&mut self, status: PlayerStatus) {
        self.state.status = status;
    }

    pub(crate) fn mark_playing(&mut self) {
        self.state.is_playing = true;
        self.state.status = PlayerStatus::Playing;
    }

    pub(crate) fn mark_paused(&mut self) {
        self.state.is_playing = false;
        self.state.status = PlayerStatus::Paused;
    }

    /// Failure and the `is_playing` rollback land in the same update.
    pub(crate) fn mark_failed(&mut self) {
        self.state.is_playing = false;
        self.state.status = PlayerStatus::Errored;
    }

    fn recompute_progress(&mut self) {
        self.state.progress_percent =
            progress_percent(self.state.current_time_secs, self.state.duration_secs);
    }
}
