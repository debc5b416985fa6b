// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{parse_duration, parse_nonzero_duration};

/// Command-line arguments for `eelink-sim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eelink-sim",
    version,
    about = "Run a mission against the simulated EeLink robot.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the simulator config file (TOML).
    ///
    /// When omitted, `EeLink.toml` in the working directory is used if it
    /// exists, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a mission file (TOML). Overrides `--tasks`.
    #[arg(long, value_name = "PATH")]
    pub mission: Option<PathBuf>,

    /// Number of image tasks in the generated mission.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 3,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub tasks: u16,

    /// Pause the mission this long after it starts (e.g. "12s").
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub pause_after: Option<Duration>,

    /// Resume a paused mission this long after it starts.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub resume_after: Option<Duration>,

    /// Request a stop this long after the mission starts.
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub stop_after: Option<Duration>,

    /// How often to poll and report the mission status. Must be non-zero.
    #[arg(
        long,
        value_name = "DURATION",
        default_value = "1s",
        value_parser = parse_nonzero_duration
    )]
    pub poll: Duration,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EELINK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate config and mission, print them, but don't run.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
