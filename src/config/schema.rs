use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::CategoryFilter;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/hush/config.toml` or `~/.config/hush/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `HUSH__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub audio: AudioSettings,
    pub catalog: CatalogSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume on startup, in percent.
    pub initial_volume: u8,
    /// Percent added or removed by `+` / `-`.
    pub volume_step: u8,
    /// Percent of the track skipped by `H` / `L`.
    pub seek_step_percent: u8,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: 70,
            volume_step: 5,
            seek_step_percent: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Interval between position reports from the audio thread (milliseconds).
    pub tick_ms: u64,
    /// Timeout for fetching a remote track (seconds).
    pub fetch_timeout_secs: u64,
    /// Fade-out duration when the player is released (milliseconds).
    /// Set to 0 to stop immediately.
    pub release_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            fetch_timeout_secs: 30,
            release_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// TOML catalog with `[[tracks]]` tables. The built-in catalog is used when unset.
    pub path: Option<PathBuf>,
    /// Category shown when the player opens.
    pub initial_category: CategoryFilter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the meditation tips panel is shown.
    pub show_tips: bool,
    /// How long a playback failure stays on screen (seconds).
    pub toast_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ breathe in, breathe out ~ ".to_string(),
            show_tips: true,
            toast_secs: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `HUSH_LOG`.
    pub filter: String,
    /// Log file; the terminal belongs to the UI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingSettings {
    pub fn log_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("hush.log"))
    }
}
