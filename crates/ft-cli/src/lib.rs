//! Focus timer CLI library.
//!
//! The terminal shell around the segment tracker: it owns the clock, the
//! tick cadence, and the control surface, and drives the core only through
//! its public operations and read-only queries.

mod cli;
pub mod commands;
mod config;
pub mod format;

pub use cli::{Cli, Commands};
pub use config::Config;
