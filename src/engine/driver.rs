use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::Track;
use crate::error::PlaybackError;

use super::output::AudioOutput;
use super::types::{EngineEvent, EngineEventKind, Generation};

/// Owner of the single audio output for one mounted player.
///
/// Every `load` starts a new generation; notifications from older
/// generations still arrive through `drain` and are left for the consumer
/// to discard.
pub struct PlaybackEngine<O: AudioOutput> {
    output: Option<O>,
    events: Option<Receiver<EngineEvent>>,
    generation: Generation,
    duration_secs: f64,
}

impl<O: AudioOutput> PlaybackEngine<O> {
    pub fn new(output: O, events: Receiver<EngineEvent>) -> Self {
        Self {
            output: Some(output),
            events: Some(events),
            generation: Generation::default(),
            duration_secs: 0.0,
        }
    }

    /// Generation of the most recent `load`.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Duration of the current generation, 0 until its metadata arrived.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn is_released(&self) -> bool {
        self.output.is_none()
    }

    /// Point the output at `track` and start buffering it.
    pub fn load(&mut self, track: &Track) -> Generation {
        self.generation = self.generation.next();
        self.duration_secs = 0.0;
        if let Some(output) = self.output.as_mut() {
            info!(generation = %self.generation, track = track.id, "loading {}", track.title);
            output.load(self.generation, &track.source);
        }
        self.generation
    }

    /// Request playback of the current generation; the outcome arrives as a
    /// `PlayResolved`/`PlayRejected` notification.
    pub fn play(&mut self) -> Generation {
        if let Some(output) = self.output.as_mut() {
            output.play(self.generation);
        }
        self.generation
    }

    pub fn pause(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.pause();
        }
    }

    /// Jump to `secs`. Refused without touching the output while the
    /// duration is unknown.
    pub fn seek(&mut self, secs: f64) -> Result<(), PlaybackError> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) || !secs.is_finite() {
            return Err(PlaybackError::InvalidSeek);
        }
        let secs = secs.clamp(0.0, self.duration_secs);
        if let Some(output) = self.output.as_mut() {
            output.seek(Duration::from_secs_f64(secs));
        }
        Ok(())
    }

    /// Map `percent` in `[0, 100]` onto the output's `[0.0, 1.0]` gain.
    pub fn set_volume(&mut self, percent: u8) {
        let gain = f32::from(percent.min(100)) / 100.0;
        if let Some(output) = self.output.as_mut() {
            output.set_volume(gain);
        }
    }

    /// Collect every notification posted since the last call.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        let mut out = Vec::new();
        let Some(rx) = self.events.as_ref() else {
            return out;
        };

        loop {
            match rx.try_recv() {
                Ok(ev) => {
                    if let EngineEventKind::MetadataReady { duration_secs } = ev.kind {
                        if ev.generation == self.generation {
                            self.duration_secs = sanitize_duration(duration_secs);
                        }
                    }
                    out.push(ev);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("engine notification channel closed");
                    self.events = None;
                    break;
                }
            }
        }
        out
    }

    /// Stop playback, detach notifications and free the output. Idempotent.
    pub fn release(&mut self) {
        if let Some(mut output) = self.output.take() {
            output.shutdown();
            info!("audio output released");
        }
        self.events = None;
        self.duration_secs = 0.0;
    }
}

impl<O: AudioOutput> Drop for PlaybackEngine<O> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Durations that are not finite and positive count as unknown.
pub(crate) fn sanitize_duration(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}
