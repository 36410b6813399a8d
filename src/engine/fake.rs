//! Recording `AudioOutput` for tests.
//!
//! Calls are logged into a shared list; notifications are injected by the
//! test through the sender returned from `fake_engine`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use super::driver::PlaybackEngine;
use super::output::AudioOutput;
use super::types::{EngineEvent, EngineEventKind, Generation};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(Generation, String),
    Play(Generation),
    Pause,
    Seek(Duration),
    SetVolume(f32),
    Shutdown,
}

#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

pub(crate) struct FakeOutput {
    log: CallLog,
}

impl AudioOutput for FakeOutput {
    fn load(&mut self, generation: Generation, source: &str) {
        self.log.push(Call::Load(generation, source.to_string()));
    }

    fn play(&mut self, generation: Generation) {
        self.log.push(Call::Play(generation));
    }

    fn pause(&mut self) {
        self.log.push(Call::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.log.push(Call::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.push(Call::SetVolume(volume));
    }

    fn shutdown(&mut self) {
        self.log.push(Call::Shutdown);
    }
}

/// Test-side handle for posting notifications as the output would.
#[derive(Clone)]
pub(crate) struct Emitter(Sender<EngineEvent>);

impl Emitter {
    pub(crate) fn send(&self, generation: Generation, kind: EngineEventKind) {
        // Ignored once the engine has released its receiver.
        let _ = self.0.send(EngineEvent::new(generation, kind));
    }

    pub(crate) fn metadata(&self, generation: Generation, duration_secs: f64) {
        self.send(generation, EngineEventKind::MetadataReady { duration_secs });
    }

    pub(crate) fn time(&self, generation: Generation, current_secs: f64) {
        self.send(
            generation,
            EngineEventKind::TimeUpdate {
                current_secs,
                progress_percent: 0.0,
            },
        );
    }

    pub(crate) fn resolved(&self, generation: Generation) {
        self.send(generation, EngineEventKind::PlayResolved);
    }

    pub(crate) fn rejected(&self, generation: Generation, reason: &str) {
        self.send(
            generation,
            EngineEventKind::PlayRejected {
                reason: reason.to_string(),
            },
        );
    }
}

pub(crate) fn fake_engine() -> (PlaybackEngine<FakeOutput>, CallLog, Emitter) {
    let (tx, rx) = mpsc::channel();
    let log = CallLog::default();
    let engine = PlaybackEngine::new(FakeOutput { log: log.clone() }, rx);
    (engine, log, Emitter(tx))
}
