//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the player (audio, controls,
//! playback timing, library location, logging) and helpers to load them from
//! disk and the environment.

mod load;
mod schema;

pub(crate) use load::xdg_home;
pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
