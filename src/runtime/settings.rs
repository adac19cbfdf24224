use crate::config;

/// Load and validate settings; any failure falls back to defaults.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => s,
            Err(msg) => {
                eprintln!("singalong: invalid config, using defaults: {msg}");
                config::Settings::default()
            }
        },
        Err(e) => {
            eprintln!("singalong: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
