use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::catalog::CategoryFilter;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_hush_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HUSH_CONFIG_PATH", "/tmp/hush-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/hush-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("hush")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("hush")
            .join("config.toml")
    );
}

#[test]
fn no_config_path_without_any_home_variables() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("HUSH_CONFIG_PATH");
    let _g2 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g3 = EnvGuard::remove("HOME");

    assert_eq!(default_config_path(), None);
    assert_eq!(resolve_config_path(), None);
}

#[test]
fn defaults_match_the_documented_values() {
    let s = Settings::default();
    assert_eq!(s.player.initial_volume, 70);
    assert_eq!(s.player.volume_step, 5);
    assert_eq!(s.player.seek_step_percent, 5);
    assert_eq!(s.audio.tick_ms, 250);
    assert_eq!(s.audio.fetch_timeout_secs, 30);
    assert_eq!(s.audio.release_fade_out_ms, 300);
    assert_eq!(s.catalog.path, None);
    assert_eq!(s.catalog.initial_category, CategoryFilter::All);
    assert!(s.ui.show_tips);
    assert_eq!(s.logging.filter, "info");
    assert_eq!(s.logging.log_file(), std::env::temp_dir().join("hush.log"));
    assert_eq!(s.validate(), Ok(()));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 40
volume_step = 10
seek_step_percent = 20

[audio]
tick_ms = 100
fetch_timeout_secs = 5
release_fade_out_ms = 0

[catalog]
path = "/srv/sounds/catalog.toml"
initial_category = "nature"

[ui]
header_text = "hello"
show_tips = false
toast_secs = 9

[logging]
filter = "hush=debug"
file = "/tmp/hush-debug.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HUSH_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("HUSH__PLAYER__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.initial_volume, 40);
    assert_eq!(s.player.volume_step, 10);
    assert_eq!(s.player.seek_step_percent, 20);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.audio.fetch_timeout_secs, 5);
    assert_eq!(s.audio.release_fade_out_ms, 0);
    assert_eq!(s.catalog.path, Some(PathBuf::from("/srv/sounds/catalog.toml")));
    assert_eq!(s.catalog.initial_category, CategoryFilter::Nature);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_tips);
    assert_eq!(s.ui.toast_secs, 9);
    assert_eq!(s.logging.filter, "hush=debug");
    assert_eq!(s.logging.log_file(), PathBuf::from("/tmp/hush-debug.log"));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
initial_volume = 40
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("HUSH_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("HUSH__PLAYER__INITIAL_VOLUME", "90");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.initial_volume, 90);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let _g1 = EnvGuard::set("HUSH_CONFIG_PATH", missing.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.player.initial_volume, 70);
    assert_eq!(s.ui.toast_secs, 4);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.seek_step_percent = 0;
    assert!(s.validate().is_err());
    s.player.seek_step_percent = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 5;
    assert!(s.validate().unwrap_err().contains("tick_ms"));
}
