//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pomodoro-style focus timer.
///
/// Runs one focus-then-break segment at a time with exact accounting of
/// focused versus break time. Paused time never counts toward either total.
#[derive(Debug, Parser)]
#[command(name = "ft", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a focus segment interactively.
    Run {
        /// Planned focus length in minutes (overrides config).
        #[arg(long)]
        focus_minutes: Option<u32>,

        /// Planned break length in minutes (overrides config).
        #[arg(long)]
        break_minutes: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accepts_duration_overrides() {
        let cli = Cli::try_parse_from(["ft", "run", "--focus-minutes", "50", "--break-minutes", "10"])
            .unwrap();

        match cli.command {
            Some(Commands::Run {
                focus_minutes,
                break_minutes,
            }) => {
                assert_eq!(focus_minutes, Some(50));
                assert_eq!(break_minutes, Some(10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_flags_are_optional() {
        let cli = Cli::try_parse_from(["ft", "run"]).unwrap();

        match cli.command {
            Some(Commands::Run {
                focus_minutes,
                break_minutes,
            }) => {
                assert_eq!(focus_minutes, None);
                assert_eq!(break_minutes, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
