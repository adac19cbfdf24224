//! Audio output collaborator.
//!
//! The timing engine only needs the [`PositionFeed`] seam; the session drives
//! the full [`AudioOutput`]. [`RodioOutput`] is the production implementation.

mod output;
mod sink;
mod types;

pub use output::RodioOutput;
pub use types::*;

#[cfg(test)]
mod tests;
