//! Interactive run loop for a single focus segment.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{TimeDelta, Utc};

use ft_core::{Segment, SegmentState};

use crate::Config;
use crate::format::{format_duration, status_line};

/// How long the loop waits for input between clock samples.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

const CONTROLS_HINT: &str = "Controls: [p]ause, [r]esume, [d]one, [c]ancel";

/// A control line typed while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Done,
    Cancel,
}

impl Command {
    /// Parses a trimmed input line; `None` for anything unrecognized.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "p" | "pause" => Some(Self::Pause),
            "r" | "resume" => Some(Self::Resume),
            "d" | "done" | "complete" => Some(Self::Done),
            "c" | "cancel" | "q" | "quit" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Runs one segment to completion or cancellation, ticking the tracker with
/// the wall clock and reprinting the status line whenever it changes.
pub fn run(config: &Config, focus_minutes: Option<u32>, break_minutes: Option<u32>) -> Result<()> {
    let nominal_focus =
        TimeDelta::minutes(i64::from(focus_minutes.unwrap_or(config.focus_minutes)));
    let nominal_break =
        TimeDelta::minutes(i64::from(break_minutes.unwrap_or(config.break_minutes)));

    let mut segment = Segment::new();
    segment.begin(Utc::now(), nominal_focus, nominal_break);
    tracing::debug!(%nominal_focus, %nominal_break, "segment begun");

    println!("{CONTROLS_HINT}");

    let commands = spawn_stdin_reader();
    let mut last_line = String::new();
    let stdout = io::stdout();

    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(Some(command)) => apply(&mut segment, command),
            Ok(None) => println!("\nUnrecognized input. {CONTROLS_HINT}"),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // stdin is gone; keep ticking on the poll cadence
                thread::sleep(POLL_INTERVAL);
            }
        }

        segment.update(Utc::now());

        match segment.state() {
            SegmentState::Completed => {
                println!("\nDone! Focused {}, break {}.",
                    format_duration(segment.actual_focus_duration()),
                    format_duration(segment.actual_break_duration()),
                );
                return Ok(());
            }
            SegmentState::NotStarted => {
                // Only cancel resets a begun segment to not-started
                println!("\nCancelled.");
                return Ok(());
            }
            _ => {}
        }

        let line = status_line(&segment);
        if line != last_line {
            let mut out = stdout.lock();
            write!(out, "\r\x1b[2K{line}")?;
            out.flush()?;
            last_line = line;
        }
    }
}

/// Translates a control command into a core operation.
///
/// Resume is gated on the paused states here: the core's `unpause` opens a
/// fresh interval even when misused, which would move the clock origin of a
/// running phase.
fn apply(segment: &mut Segment, command: Command) {
    match command {
        Command::Pause => segment.pause(),
        Command::Resume => match segment.state() {
            SegmentState::PausedFocus | SegmentState::PausedBreak => {
                segment.unpause(Utc::now());
            }
            state => tracing::debug!(%state, "resume ignored while not paused"),
        },
        Command::Done => segment.complete(),
        Command::Cancel => segment.cancel(),
    }
}

/// Reads stdin lines on a background thread, parsing each into a command.
///
/// Empty lines are dropped; unrecognized non-empty lines come through as
/// `None` so the loop can print a hint.
fn spawn_stdin_reader() -> mpsc::Receiver<Option<Command>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(Command::from_line(&line)).is_err() {
                break;
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn command_parsing() {
        assert_eq!(Command::from_line("p"), Some(Command::Pause));
        assert_eq!(Command::from_line("  PAUSE "), Some(Command::Pause));
        assert_eq!(Command::from_line("r"), Some(Command::Resume));
        assert_eq!(Command::from_line("resume"), Some(Command::Resume));
        assert_eq!(Command::from_line("d"), Some(Command::Done));
        assert_eq!(Command::from_line("complete"), Some(Command::Done));
        assert_eq!(Command::from_line("q"), Some(Command::Cancel));
        assert_eq!(Command::from_line("cancel"), Some(Command::Cancel));
        assert_eq!(Command::from_line("nope"), None);
        assert_eq!(Command::from_line(""), None);
    }

    #[test]
    fn apply_pause_and_resume_round_trip() {
        let mut segment = Segment::new();
        segment.begin_with_defaults(Utc::now());

        apply(&mut segment, Command::Pause);
        assert_eq!(segment.state(), SegmentState::PausedFocus);

        apply(&mut segment, Command::Resume);
        assert_eq!(segment.state(), SegmentState::StartedFocus);
    }

    #[test]
    fn apply_resume_while_running_keeps_the_clock_origin() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 9, 0, 0).unwrap();
        let mut segment = Segment::new();
        segment.begin_with_defaults(start);

        apply(&mut segment, Command::Resume);

        assert_eq!(segment.state(), SegmentState::StartedFocus);
        assert_eq!(segment.current_interval().unwrap().start, start);
    }

    #[test]
    fn apply_done_and_cancel() {
        let mut segment = Segment::new();
        segment.begin_with_defaults(Utc::now());
        apply(&mut segment, Command::Done);
        assert_eq!(segment.state(), SegmentState::Completed);

        let mut segment = Segment::new();
        segment.begin_with_defaults(Utc::now());
        apply(&mut segment, Command::Cancel);
        assert_eq!(segment.state(), SegmentState::NotStarted);
    }
}
