//! Timed-lyrics (LRC) parsing.
//!
//! Turns `[mm:ss.xx]text` lines into an ordered [`Timeline`]. Parsing is
//! forgiving: anything that does not match the grammar is skipped.

mod model;
mod parse;

pub use model::*;
pub use parse::{load, parse};
