//! Library components of the `uilog` command line.

pub mod config;
pub mod logging;
pub mod prompt;
