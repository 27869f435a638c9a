//! Status-line rendering for the timer surface.

use chrono::TimeDelta;
use ft_core::{Segment, SegmentState};

/// Formats a duration as `Xm Ys`. Negative durations render as `0m 0s`.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let total_secs = duration.num_seconds().max(0);
    format!("{}m {}s", total_secs / 60, total_secs % 60)
}

/// One line describing the segment's phase and the countdown of the active
/// phase's remaining time.
#[must_use]
pub fn status_line(segment: &Segment) -> String {
    let focus_left = segment
        .remaining_focus_duration()
        .unwrap_or_else(TimeDelta::zero);
    let break_left = segment
        .remaining_break_duration()
        .unwrap_or_else(TimeDelta::zero);

    match segment.state() {
        SegmentState::NotStarted => "Not started".to_string(),
        SegmentState::StartedFocus => {
            format!("Focusing... {} left", format_duration(focus_left))
        }
        SegmentState::PausedFocus => {
            format!("Paused (focus)... {} left", format_duration(focus_left))
        }
        SegmentState::StartedBreak => {
            format!("Break time... {} left", format_duration(break_left))
        }
        SegmentState::PausedBreak => {
            format!("Paused (break)... {} left", format_duration(break_left))
        }
        SegmentState::Completed => "Done! 0m 0s".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use ft_core::Segment;
    use insta::assert_snapshot;

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn format_duration_floors_at_zero() {
        assert_eq!(format_duration(TimeDelta::zero()), "0m 0s");
        assert_eq!(format_duration(TimeDelta::seconds(-30)), "0m 0s");
        assert_eq!(
            format_duration(TimeDelta::minutes(24) + TimeDelta::seconds(59)),
            "24m 59s"
        );
        assert_eq!(format_duration(TimeDelta::minutes(60)), "60m 0s");
    }

    #[test]
    fn status_lines_through_a_segment() {
        let t0 = nine_am();
        let mut segment = Segment::new();
        assert_snapshot!(status_line(&segment), @"Not started");

        segment.begin_with_defaults(t0);
        segment.update(t0 + TimeDelta::seconds(1));
        assert_snapshot!(status_line(&segment), @"Focusing... 24m 59s left");

        // Crossing the boundary mid-tick: the overshoot shows up as elapsed
        // break time.
        segment.update(t0 + TimeDelta::minutes(25) + TimeDelta::seconds(30));
        assert_snapshot!(status_line(&segment), @"Break time... 4m 30s left");

        segment.update(t0 + TimeDelta::minutes(31));
        assert_snapshot!(status_line(&segment), @"Done! 0m 0s");
    }

    #[test]
    fn paused_status_shows_the_frozen_countdown() {
        let t0 = nine_am();
        let mut segment = Segment::new();
        segment.begin_with_defaults(t0);
        segment.update(t0 + TimeDelta::minutes(10));
        segment.pause();

        assert_snapshot!(status_line(&segment), @"Paused (focus)... 15m 0s left");

        segment.unpause(t0 + TimeDelta::minutes(12));
        segment.update(t0 + TimeDelta::minutes(27));
        assert_eq!(segment.state(), ft_core::SegmentState::StartedBreak);
        segment.pause();

        assert_snapshot!(status_line(&segment), @"Paused (break)... 5m 0s left");
    }
}
