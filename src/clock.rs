//! Playback clock: one authoritative "current time" for the loaded song.
//!
//! The clock reconciles two sources: the audio output's position feed, which
//! is accurate only while audio is actually streaming, and the wall clock,
//! which is used as a fallback and may drift. All operations take `now`
//! explicitly so drivers and tests control time.

mod model;

pub use model::*;
