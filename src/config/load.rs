use std::{env, path::PathBuf};

use super::schema::Settings;

// Layering, lowest to highest: struct defaults, the TOML file (if any),
// then `HUSH__SECTION__KEY` variables.
impl Settings {
    /// Build settings from the config file and `HUSH__` environment overrides.
    /// A missing file is not an error.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("HUSH")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the player cannot work with. The message names the
    /// offending key.
    pub fn validate(&self) -> Result<(), String> {
        if self.player.initial_volume > 100 {
            return Err("player.initial_volume must be <= 100".to_string());
        }
        if self.player.volume_step == 0 {
            return Err("player.volume_step must be >= 1".to_string());
        }
        if !(1..=100).contains(&self.player.seek_step_percent) {
            return Err("player.seek_step_percent must be within 1..=100".to_string());
        }
        if self.audio.tick_ms < 10 {
            return Err("audio.tick_ms must be >= 10".to_string());
        }
        Ok(())
    }
}

/// `HUSH_CONFIG_PATH` when set, otherwise [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("HUSH_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `hush/config.toml` under `$XDG_CONFIG_HOME`, or under `~/.config` without it.
/// `None` only when neither variable is set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("hush").join("config.toml"))
}
