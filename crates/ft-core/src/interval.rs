//! Contiguous spans of recorded time.

use chrono::{DateTime, TimeDelta, Utc};

/// A contiguous span of time: a starting instant and a duration.
///
/// A segment extends exactly one interval at a time (its current interval);
/// once an interval is closed into a focus or break collection it is never
/// modified again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// When the span began.
    pub start: DateTime<Utc>,
    /// How much time the span covers.
    pub duration: TimeDelta,
}

impl Interval {
    /// Creates an interval from a starting instant and a duration.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self { start, duration }
    }

    /// Creates a zero-length interval opening at `start`.
    #[must_use]
    pub fn open_at(start: DateTime<Utc>) -> Self {
        Self::new(start, TimeDelta::zero())
    }

    /// The instant the span ends.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }
}
