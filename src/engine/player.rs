use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::error::AudioError;

use super::output::AudioOutput;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineEvent, Generation};

/// `AudioOutput` backed by a dedicated `rodio` audio thread.
pub struct RodioOutput {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    release_fade_out: Duration,
}

impl RodioOutput {
    /// Open the default output device on a new audio thread.
    ///
    /// Returns the output together with the receiving end of its
    /// notification channel.
    pub fn spawn(settings: &AudioSettings) -> Result<(Self, Receiver<EngineEvent>), AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let join = spawn_audio_thread(rx, tx.clone(), events_tx, settings.clone(), ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => Ok((
                Self {
                    tx,
                    join: Some(join),
                    release_fade_out: Duration::from_millis(settings.release_fade_out_ms),
                },
                events_rx,
            )),
            Ok(Err(e)) => {
                let _ = join.join();
                Err(e)
            }
            Err(_) => Err(AudioError::ThreadGone),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("audio thread is gone; command dropped");
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, generation: Generation, source: &str) {
        self.send(AudioCmd::Load {
            generation,
            source: source.to_string(),
        });
    }

    fn play(&mut self, generation: Generation) {
        self.send(AudioCmd::Play { generation });
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.join.take() else {
            return;
        };
        self.send(AudioCmd::Release {
            fade_out_ms: self.release_fade_out.as_millis() as u64,
        });
        let _ = handle.join();
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        self.shutdown();
    }
}
