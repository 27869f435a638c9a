//! Command implementations.

pub mod run;
