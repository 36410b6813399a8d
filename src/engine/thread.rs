use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::error::AudioError;
use crate::playback::progress_percent;

use super::settle::{PlayDecision, Settlement};
use super::source::{create_sink_at, fetch, http_client, probe_duration};
use super::types::{AudioCmd, EngineEvent, EngineEventKind, Generation};

/// Decoded audio for one generation.
struct Loaded {
    generation: Generation,
    bytes: Arc<[u8]>,
    sink: Sink,
    duration: Option<Duration>,
    /// Where the sink's source starts in the track. `Sink::get_pos` counts
    /// from zero after a rebuild that skipped ahead.
    offset: Duration,
    ended: bool,
}

impl Loaded {
    fn duration_secs(&self) -> f64 {
        self.duration.map_or(0.0, |d| d.as_secs_f64())
    }
}

struct AudioThread {
    stream: OutputStream,
    cmd_tx: Sender<AudioCmd>,
    events: Sender<EngineEvent>,
    client: Client,
    /// Latest load generation, shared with fetch workers so superseded ones stop early.
    latest_load: Arc<AtomicU64>,
    volume: f32,
    settlement: Settlement,
    current: Option<Loaded>,
    playing: bool,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    cmd_tx: Sender<AudioCmd>,
    events: Sender<EngineEvent>,
    settings: AudioSettings,
    ready: SyncSender<Result<(), AudioError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(AudioError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);
        let client = match http_client(Duration::from_secs(settings.fetch_timeout_secs.max(1))) {
            Ok(c) => c,
            Err(e) => {
                let _ = ready.send(Err(AudioError::HttpClient(e.to_string())));
                return;
            }
        };
        let _ = ready.send(Ok(()));

        let tick = Duration::from_millis(settings.tick_ms.max(10));
        let mut audio = AudioThread {
            stream,
            cmd_tx,
            events,
            client,
            latest_load: Arc::new(AtomicU64::new(Generation::default().get())),
            volume: 1.0,
            settlement: Settlement::default(),
            current: None,
            playing: false,
        };

        let mut last_tick = Instant::now();
        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Release { fade_out_ms }) => {
                    audio.release(fade_out_ms);
                    break;
                }
                Ok(cmd) => audio.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_tick.elapsed() >= tick {
                audio.tick();
                last_tick = Instant::now();
            }
        }
        debug!("audio thread exiting");
    })
}

impl AudioThread {
    fn emit(&self, generation: Generation, kind: EngineEventKind) {
        // The receiver disappears once the engine is released; nothing left to tell.
        let _ = self.events.send(EngineEvent::new(generation, kind));
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load { generation, source } => self.load(generation, source),
            AudioCmd::Fetched { generation, result } => {
                if !self.settlement.accepts(generation) {
                    let latest = self.settlement.latest();
                    debug!(%generation, %latest, "dropping superseded load");
                    return;
                }
                match result {
                    Ok(bytes) => self.install(generation, bytes),
                    Err(e) => self.fail(generation, e.to_string()),
                }
            }
            AudioCmd::Play { generation } => self.play(generation),
            AudioCmd::Pause => {
                self.settlement.cancel_pending();
                self.playing = false;
                if let Some(cur) = self.current.as_ref() {
                    cur.sink.pause();
                }
            }
            AudioCmd::Seek(position) => self.seek(position),
            AudioCmd::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(cur) = self.current.as_ref() {
                    cur.sink.set_volume(self.volume);
                }
            }
            AudioCmd::Release { fade_out_ms } => self.release(fade_out_ms),
        }
    }

    fn load(&mut self, generation: Generation, source: String) {
        if let Some(old) = self.current.take() {
            old.sink.stop();
        }
        self.settlement.begin_load(generation);
        self.latest_load.store(generation.get(), Ordering::Release);
        self.playing = false;

        let tx = self.cmd_tx.clone();
        let client = self.client.clone();
        let latest = Arc::clone(&self.latest_load);
        thread::spawn(move || run_fetch(generation, &source, &client, &latest, &tx));
    }

    fn install(&mut self, generation: Generation, bytes: Arc<[u8]>) {
        let (sink, decoder_total) = match create_sink_at(&self.stream, &bytes, Duration::ZERO) {
            Ok(v) => v,
            Err(e) => {
                self.fail(generation, e.to_string());
                return;
            }
        };
        sink.set_volume(self.volume);

        let duration = probe_duration(&bytes).or(decoder_total);
        let loaded = Loaded {
            generation,
            bytes,
            sink,
            duration,
            offset: Duration::ZERO,
            ended: false,
        };
        self.emit(
            generation,
            EngineEventKind::MetadataReady {
                duration_secs: loaded.duration_secs(),
            },
        );
        self.current = Some(loaded);

        if self.settlement.installed(generation) {
            self.start(generation);
        }
    }

    fn fail(&mut self, generation: Generation, reason: String) {
        error!(%generation, "failed to load track: {reason}");
        for kind in self.settlement.failed(generation, reason) {
            self.emit(generation, kind);
        }
    }

    fn play(&mut self, generation: Generation) {
        match self.settlement.play(generation, self.current.is_some()) {
            PlayDecision::Start => self.start(generation),
            PlayDecision::Park => debug!(%generation, "play waiting for audio"),
            PlayDecision::Reject(reason) => {
                self.emit(generation, EngineEventKind::PlayRejected { reason });
            }
        }
    }

    /// Start the loaded sink, restarting from zero if it already played out.
    fn start(&mut self, generation: Generation) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };

        if cur.ended {
            match create_sink_at(&self.stream, &cur.bytes, Duration::ZERO) {
                Ok((sink, _)) => {
                    sink.set_volume(self.volume);
                    cur.sink.stop();
                    cur.sink = sink;
                    cur.offset = Duration::ZERO;
                    cur.ended = false;
                }
                Err(e) => {
                    let reason = e.to_string();
                    warn!(%generation, "failed to restart track: {reason}");
                    self.emit(generation, EngineEventKind::PlayRejected { reason });
                    return;
                }
            }
        }

        cur.sink.play();
        self.playing = true;
        self.emit(generation, EngineEventKind::PlayResolved);
    }

    fn seek(&mut self, position: Duration) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        let position = match cur.duration {
            Some(d) => position.min(d),
            None => position,
        };

        if !cur.ended && cur.sink.try_seek(position).is_ok() {
            cur.offset = Duration::ZERO;
        } else {
            // Rebuild and skip into the source instead.
            match create_sink_at(&self.stream, &cur.bytes, position) {
                Ok((sink, _)) => {
                    sink.set_volume(self.volume);
                    if self.playing {
                        sink.play();
                    }
                    cur.sink.stop();
                    cur.sink = sink;
                    cur.offset = position;
                    cur.ended = false;
                }
                Err(e) => {
                    warn!(generation = %cur.generation, "seek failed: {e}");
                    return;
                }
            }
        }

        let current_secs = position.as_secs_f64();
        let generation = cur.generation;
        let duration_secs = cur.duration_secs();
        self.emit(
            generation,
            EngineEventKind::TimeUpdate {
                current_secs,
                progress_percent: progress_percent(current_secs, duration_secs),
            },
        );
    }

    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        if cur.ended {
            return;
        }

        let generation = cur.generation;
        let duration_secs = cur.duration_secs();
        if cur.sink.empty() {
            cur.ended = true;
            self.playing = false;
            let current_secs = duration_secs;
            self.emit(
                generation,
                EngineEventKind::TimeUpdate {
                    current_secs,
                    progress_percent: progress_percent(current_secs, duration_secs),
                },
            );
            self.emit(generation, EngineEventKind::Ended);
        } else {
            let current_secs =
                playback_position(cur.offset, cur.sink.get_pos(), cur.duration).as_secs_f64();
            self.emit(
                generation,
                EngineEventKind::TimeUpdate {
                    current_secs,
                    progress_percent: progress_percent(current_secs, duration_secs),
                },
            );
        }
    }

    fn release(&mut self, fade_out_ms: u64) {
        self.settlement.cancel_pending();
        if let Some(cur) = self.current.take() {
            if self.playing {
                fade_out_sink(&cur.sink, self.volume, fade_out_ms);
            }
            cur.sink.stop();
        }
        self.playing = false;
    }
}

/// Fetch `source` and post it back, unless a newer load replaced
/// `generation` before the download started or before it finished.
pub(super) fn run_fetch(
    generation: Generation,
    source: &str,
    client: &Client,
    latest: &AtomicU64,
    tx: &Sender<AudioCmd>,
) {
    if is_superseded(latest, generation) {
        debug!(%generation, "skipping fetch for superseded load");
        return;
    }
    let result = fetch(source, client);
    if is_superseded(latest, generation) {
        debug!(%generation, "discarding fetch for superseded load");
        return;
    }
    // The audio thread may already be gone after a release.
    let _ = tx.send(AudioCmd::Fetched { generation, result });
}

fn is_superseded(latest: &AtomicU64, generation: Generation) -> bool {
    latest.load(Ordering::Acquire) != generation.get()
}

/// Position within the track given where the sink's source starts and how
/// far the sink has played, capped at the known duration.
pub(super) fn playback_position(
    offset: Duration,
    played: Duration,
    duration: Option<Duration>,
) -> Duration {
    let position = offset.saturating_add(played);
    match duration {
        Some(d) => position.min(d),
        None => position,
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
