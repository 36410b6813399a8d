use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global subscriber, writing to the configured log file since
/// the terminal belongs to the UI. `HUSH_LOG` overrides `logging.filter`.
pub fn configure_logging(settings: &LoggingSettings) -> std::io::Result<PathBuf> {
    let path = settings.log_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_env("HUSH_LOG").unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    // Already installed when the runtime is started twice in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true)
        .try_init();

    Ok(path)
}
