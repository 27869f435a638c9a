//! Core domain logic for the focus timer.
//!
//! This crate contains the fundamental types and logic for:
//! - Interval: a contiguous span of recorded time
//! - Segment: the focus-then-break state machine and its time accounting
//!
//! The crate never reads a clock; every "current time" value is passed in
//! by the caller, which keeps the state machine deterministic and testable.

pub mod interval;
pub mod segment;

pub use interval::Interval;
pub use segment::{DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, Segment, SegmentState};
