use super::*;
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
fn resolve_config_path_prefers_singalong_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SINGALONG_CONFIG_PATH", "/tmp/singalong-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/singalong-test-config.toml")
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
            .join("singalong")
            .join("config.toml")
    );
}

#[test]
fn xdg_home_falls_back_to_home_subdir() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        xdg_home("XDG_STATE_HOME", ".local/state").unwrap(),
        PathBuf::from("/tmp/home-dir").join(".local/state")
    );
}

#[test]
fn defaults_match_reference_behavior() {
    let s = Settings::default();
    assert_eq!(s.controls.seek_seconds, 5);
    assert_eq!(s.playback.end_epsilon_ms, 500);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!((s.audio.volume - 0.7).abs() < f32::EPSILON);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.25
volume_step = 0.05

[controls]
seek_seconds = 10

[playback]
tick_ms = 40
end_epsilon_ms = 250
status_ms = 1000

[library]
dir = "/srv/karaoke"
extensions = ["mp3", "ogg"]
include_hidden = true

[logging]
level = "debug"
file = "/tmp/singalong.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SINGALONG_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SINGALONG__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert!((s.audio.volume - 0.25).abs() < f32::EPSILON);
    assert_eq!(s.controls.seek_seconds, 10);
    assert_eq!(s.playback.tick_ms, 40);
    assert_eq!(s.playback.end_epsilon_ms, 250);
    assert_eq!(s.playback.status_ms, 1000);
    assert_eq!(s.library.dir, Some(PathBuf::from("/srv/karaoke")));
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(s.library.include_hidden);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/singalong.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
seek_seconds = 10
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SINGALONG_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SINGALONG__CONTROLS__SEEK_SECONDS", "3");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_seconds, 3);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());
}
