//! The focus-then-break state machine and its time accounting.

use chrono::{DateTime, TimeDelta, Utc};

use crate::interval::Interval;

/// Default nominal focus duration, in minutes.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

/// Default nominal break duration, in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Phase of a focus segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentState {
    /// No segment is underway.
    #[default]
    NotStarted,
    /// Focus time is running.
    StartedFocus,
    /// Focus time is paused.
    PausedFocus,
    /// Break time is running.
    StartedBreak,
    /// Break time is paused.
    PausedBreak,
    /// Both phases have finished.
    Completed,
}

impl SegmentState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::StartedFocus => "started_focus",
            Self::PausedFocus => "paused_focus",
            Self::StartedBreak => "started_break",
            Self::PausedBreak => "paused_break",
            Self::Completed => "completed",
        }
    }

    /// Whether this is one of the two running phases.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::StartedFocus | Self::StartedBreak)
    }
}

impl std::fmt::Display for SegmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single focus-then-break timed unit.
///
/// The segment reconciles the nominal plan set at [`Segment::begin`] against
/// actual elapsed time sampled at irregular [`Segment::update`] ticks. Paused
/// time is excluded from the totals, and a tick that straddles the
/// focus-to-break boundary is split so that no time is lost or double-counted
/// on either side.
///
/// Misuse (pausing while not running, beginning twice, and so on) is reported
/// as a warning and the operation still applies its documented effect; no
/// operation fails. Callers must serialize access to a segment, and the `now`
/// values passed to [`Segment::update`] must be monotonically non-decreasing.
///
/// A cancelled segment returns to its freshly-constructed state in place, so
/// one instance can be reused across any number of begin/cancel cycles.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    state: SegmentState,
    current_interval: Option<Interval>,
    focus_intervals: Vec<Interval>,
    break_intervals: Vec<Interval>,
    nominal_focus_duration: Option<TimeDelta>,
    nominal_break_duration: Option<TimeDelta>,
}

impl Segment {
    /// Creates a segment with no plan and nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commences the focus phase at `start` with the given nominal durations.
    ///
    /// Clears anything recorded by a previous run of this segment. Calling
    /// this on a segment that is already underway is reported as misuse but
    /// still restarts it.
    pub fn begin(
        &mut self,
        start: DateTime<Utc>,
        nominal_focus_duration: TimeDelta,
        nominal_break_duration: TimeDelta,
    ) {
        if self.state != SegmentState::NotStarted {
            tracing::warn!(state = %self.state, "begin called on a segment that is already underway; restarting");
        }

        self.state = SegmentState::StartedFocus;
        self.current_interval = Some(Interval::open_at(start));
        self.focus_intervals.clear();
        self.break_intervals.clear();
        self.nominal_focus_duration = Some(nominal_focus_duration);
        self.nominal_break_duration = Some(nominal_break_duration);
    }

    /// Commences the focus phase with the default 25 minute / 5 minute plan.
    pub fn begin_with_defaults(&mut self, start: DateTime<Utc>) {
        self.begin(
            start,
            TimeDelta::minutes(i64::from(DEFAULT_FOCUS_MINUTES)),
            TimeDelta::minutes(i64::from(DEFAULT_BREAK_MINUTES)),
        );
    }

    /// Advances the segment to `now`.
    ///
    /// The caller owns the tick cadence; gaps of any size are handled. In a
    /// running phase this extends the current interval and, on reaching the
    /// phase's nominal duration, closes it trimmed to exactly the nominal
    /// boundary. The trimmed-off overshoot becomes the first slice of break
    /// time at the focus-to-break transition, and is discarded at completion.
    /// At most one phase transition is applied per tick. Paused, not-started,
    /// and completed segments do not advance.
    pub fn update(&mut self, now: DateTime<Utc>) {
        match self.state {
            SegmentState::NotStarted
            | SegmentState::PausedFocus
            | SegmentState::PausedBreak
            | SegmentState::Completed => {}
            SegmentState::StartedFocus => self.tick_focus(now),
            SegmentState::StartedBreak => self.tick_break(now),
        }
    }

    fn tick_focus(&mut self, now: DateTime<Utc>) {
        match self.current_interval.as_mut() {
            Some(current) => current.duration = now - current.start,
            None => self.current_interval = Some(Interval::open_at(now)),
        }

        // begin sets the nominals before focus can ever run
        let Some(nominal) = self.nominal_focus_duration else {
            return;
        };

        if self.actual_focus_duration() < nominal {
            return;
        }

        // Split the straddling span: focus closes exactly at the nominal
        // boundary and the overshoot opens the break.
        let overshoot = self.actual_focus_duration() - nominal;
        if let Some(closing) = self.current_interval.take() {
            self.focus_intervals
                .push(Interval::new(closing.start, closing.duration - overshoot));
        }
        self.current_interval = Some(Interval::new(now - overshoot, overshoot));
        self.state = SegmentState::StartedBreak;
    }

    fn tick_break(&mut self, now: DateTime<Utc>) {
        match self.current_interval.as_mut() {
            Some(current) => current.duration = now - current.start,
            None => self.current_interval = Some(Interval::open_at(now)),
        }

        let Some(nominal) = self.nominal_break_duration else {
            return;
        };

        if self.actual_break_duration() < nominal {
            return;
        }

        // No phase follows the break, so the overshoot is discarded.
        let overshoot = self.actual_break_duration() - nominal;
        if let Some(closing) = self.current_interval.take() {
            self.break_intervals
                .push(Interval::new(closing.start, closing.duration - overshoot));
        }
        self.state = SegmentState::Completed;
    }

    /// Pauses the running phase, freezing its accounting.
    ///
    /// Closes the current interval into the matching collection. Reported as
    /// misuse (with no state change) when nothing is running.
    pub fn pause(&mut self) {
        match self.state {
            SegmentState::StartedFocus => {
                self.state = SegmentState::PausedFocus;
                match self.current_interval.take() {
                    Some(current) => self.focus_intervals.push(current),
                    None => tracing::warn!("pausing focus with no current interval to close"),
                }
            }
            SegmentState::StartedBreak => {
                self.state = SegmentState::PausedBreak;
                match self.current_interval.take() {
                    Some(current) => self.break_intervals.push(current),
                    None => tracing::warn!("pausing a break with no current interval to close"),
                }
            }
            state => tracing::warn!(state = %state, "pause called while not running"),
        }
    }

    /// Resumes a paused phase, restarting the clock origin at `now`.
    ///
    /// A fresh zero-duration current interval opens even on the misuse path
    /// (calling this while not paused leaves the state alone but still opens
    /// the interval).
    pub fn unpause(&mut self, now: DateTime<Utc>) {
        match self.state {
            SegmentState::PausedFocus => self.state = SegmentState::StartedFocus,
            SegmentState::PausedBreak => self.state = SegmentState::StartedBreak,
            state => tracing::warn!(state = %state, "unpause called while not paused"),
        }

        self.current_interval = Some(Interval::open_at(now));
    }

    /// Finishes the segment now, from any state.
    ///
    /// A running phase's current interval is closed untrimmed, so the totals
    /// reflect exactly what had been ticked, which may fall short of the
    /// nominal plan.
    pub fn complete(&mut self) {
        match self.state {
            SegmentState::StartedFocus => {
                if let Some(current) = self.current_interval.take() {
                    self.focus_intervals.push(current);
                }
            }
            SegmentState::StartedBreak => {
                if let Some(current) = self.current_interval.take() {
                    self.break_intervals.push(current);
                }
            }
            _ => {}
        }

        self.current_interval = None;
        self.state = SegmentState::Completed;
    }

    /// Aborts the segment from any state, discarding everything recorded.
    ///
    /// The segment returns to its freshly-constructed state and can be begun
    /// again.
    pub fn cancel(&mut self) {
        self.state = SegmentState::NotStarted;
        self.current_interval = None;
        self.focus_intervals.clear();
        self.break_intervals.clear();
        self.nominal_focus_duration = None;
        self.nominal_break_duration = None;
    }

    /// Total focus time recorded so far.
    ///
    /// The sum of the closed focus intervals, plus the current interval while
    /// a focus phase is active. Under the state machine a paused segment holds
    /// no current interval, so the paused arm of the guard only matters for
    /// hand-built states.
    #[must_use]
    pub fn actual_focus_duration(&self) -> TimeDelta {
        let mut total = self
            .focus_intervals
            .iter()
            .fold(TimeDelta::zero(), |sum, interval| sum + interval.duration);

        if let Some(current) = &self.current_interval {
            if matches!(
                self.state,
                SegmentState::StartedFocus | SegmentState::PausedFocus
            ) {
                total = total + current.duration;
            }
        }

        total
    }

    /// Total break time recorded so far.
    #[must_use]
    pub fn actual_break_duration(&self) -> TimeDelta {
        let mut total = self
            .break_intervals
            .iter()
            .fold(TimeDelta::zero(), |sum, interval| sum + interval.duration);

        if let Some(current) = &self.current_interval {
            if matches!(
                self.state,
                SegmentState::StartedBreak | SegmentState::PausedBreak
            ) {
                total = total + current.duration;
            }
        }

        total
    }

    /// Focus time left before the nominal boundary.
    ///
    /// `None` until a plan is set by [`Segment::begin`]. May be negative only
    /// transiently, on a tick that crossed a boundary the transition has not
    /// yet trimmed.
    #[must_use]
    pub fn remaining_focus_duration(&self) -> Option<TimeDelta> {
        self.nominal_focus_duration
            .map(|nominal| nominal - self.actual_focus_duration())
    }

    /// Break time left before the nominal boundary.
    #[must_use]
    pub fn remaining_break_duration(&self) -> Option<TimeDelta> {
        self.nominal_break_duration
            .map(|nominal| nominal - self.actual_break_duration())
    }

    /// The segment's current phase.
    #[must_use]
    pub const fn state(&self) -> SegmentState {
        self.state
    }

    /// The still-accumulating interval for the active phase, if any.
    #[must_use]
    pub const fn current_interval(&self) -> Option<Interval> {
        self.current_interval
    }

    /// Closed intervals recorded during focus phases.
    #[must_use]
    pub fn focus_intervals(&self) -> &[Interval] {
        &self.focus_intervals
    }

    /// Closed intervals recorded during break phases.
    #[must_use]
    pub fn break_intervals(&self) -> &[Interval] {
        &self.break_intervals
    }

    /// The planned focus length, set at [`Segment::begin`].
    #[must_use]
    pub const fn nominal_focus_duration(&self) -> Option<TimeDelta> {
        self.nominal_focus_duration
    }

    /// The planned break length, set at [`Segment::begin`].
    #[must_use]
    pub const fn nominal_break_duration(&self) -> Option<TimeDelta> {
        self.nominal_break_duration
    }
}
