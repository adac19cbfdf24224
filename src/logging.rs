//! Tracing setup.
//!
//! The terminal is in raw mode while playing, so log output goes to a file
//! only. `RUST_LOG` overrides `logging.level`.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, xdg_home};

/// `$XDG_STATE_HOME/singalong/singalong.log`, or `~/.local/state/...`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", ".local/state").map(|d| d.join("singalong").join("singalong.log"))
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the configured log file.
///
/// Returns the log path, or `None` when no file could be opened; the player
/// then runs without logging.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(default_log_path)?;

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("singalong: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(path)
}
