//! singalong: a terminal karaoke player.
//!
//! The library exposes the timing engine (lyrics parsing, the playback clock,
//! line location and playlist sequencing) together with the session that ties
//! them to an audio output. The binary in `main.rs` is a thin keypress driver.

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod library;
pub mod locator;
pub mod logging;
pub mod lyrics;
pub mod playlist;
pub mod runtime;
pub mod session;
