//! Turning a track's source locator into a ready-to-play `rodio` sink.
//!
//! Sources are fetched fully into memory (remote URLs over HTTP(S), local
//! files from disk) so the sink can be rebuilt cheaply when seeking.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use lofty::probe::Probe;
use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::SourceError;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Locator {
    Remote(String),
    Local(PathBuf),
}

/// Classify a locator: `http(s)://` is remote, `file://` and anything else is a path.
pub(super) fn parse_locator(locator: &str) -> Locator {
    let trimmed = locator.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Locator::Remote(trimmed.to_string())
    } else if let Some(rest) = trimmed.strip_prefix("file://") {
        Locator::Local(PathBuf::from(rest))
    } else {
        Locator::Local(PathBuf::from(trimmed))
    }
}

/// HTTP client shared by every fetch worker of one audio thread.
pub(super) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Read the whole source into memory. Blocking; runs on a fetch worker.
pub(super) fn fetch(locator: &str, client: &Client) -> Result<Arc<[u8]>, SourceError> {
    let bytes: Vec<u8> = match parse_locator(locator) {
        Locator::Remote(url) => {
            let http_err = |source| SourceError::Http {
                url: url.clone(),
                source,
            };
            client
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes())
                .map_err(http_err)?
                .to_vec()
        }
        Locator::Local(path) => {
            std::fs::read(&path).map_err(|source| SourceError::Io { path, source })?
        }
    };

    if bytes.is_empty() {
        return Err(SourceError::Empty(locator.to_string()));
    }
    Ok(Arc::from(bytes))
}

/// Length of the encoded audio according to its container metadata.
pub(super) fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    let d = tagged.properties().duration();
    (!d.is_zero()).then_some(d)
}

/// Create a paused `Sink` for `bytes` starting at `start_at`, along with the
/// decoder's own idea of the total duration.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    bytes: &Arc<[u8]>,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), SourceError> {
    let decoder =
        Decoder::new(Cursor::new(bytes.clone())).map_err(|e| SourceError::Decode(e.to_string()))?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` doubles as the seek fallback; Duration::ZERO is a no-op.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
