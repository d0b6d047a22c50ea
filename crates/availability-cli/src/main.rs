//! `freebusy` CLI — free/busy computation and meeting suggestions from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for one calendar (stdin → stdout)
//! echo '{"window":{"start":"2026-03-02T09:00","end":"2026-03-02T17:00"},
//!        "busy":[{"start":"2026-03-02T10:00","end":"2026-03-02T10:30"}]}' | freebusy free
//!
//! # First free slot of at least 45 minutes, wall-clock times in Helsinki
//! freebusy --timezone Europe/Helsinki free --min-duration 45 -i day.json
//!
//! # Merge attendee calendars, exposing per-block source counts
//! freebusy merge --privacy full -i team.json
//!
//! # Up to three 30 minute meeting suggestions
//! freebusy suggest --duration 30 --limit 3 -i team.json -o slots.json
//!
//! # Who is busy during a proposed meeting
//! freebusy check --start 2026-03-02T10:00 --end 2026-03-02T11:00 -i team.json
//! ```

mod dto;

use anyhow::{Context, Result};
use availability_engine::{
    check_proposed, compute_free_slots, find_first_free_slot, merge_availability,
    parse_timestamp, parse_timezone, suggest_meeting_times, BusyInterval, FreeInterval,
    MeetingRequest, PrivacyLevel,
};
use chrono::Duration;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::dto::{AvailabilityDto, CalendarsInput, ConflictDto, FreeBusyInput, FreeSlotDto};

#[derive(Parser)]
#[command(
    name = "freebusy",
    version,
    about = "Free/busy computation and meeting-time suggestions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone for timestamps without an offset, and for output
    #[arg(long, global = true, env = "FREEBUSY_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots for a window and one calendar's busy intervals
    Free {
        #[command(flatten)]
        io: IoArgs,
        /// Only report the first free slot at least this many minutes long
        #[arg(long)]
        min_duration: Option<i64>,
    },
    /// Merge several calendars into one busy/free view
    Merge {
        #[command(flatten)]
        io: IoArgs,
        /// How much per-calendar detail the busy blocks reveal
        #[arg(long, value_enum, default_value_t = PrivacyArg::Opaque)]
        privacy: PrivacyArg,
    },
    /// Suggest meeting times where every calendar is free
    Suggest {
        #[command(flatten)]
        io: IoArgs,
        /// Meeting length in minutes
        #[arg(long)]
        duration: i64,
        /// Maximum number of suggestions
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// List the calendars a proposed meeting conflicts with. The meeting must
    /// lie inside the input window
    Check {
        #[command(flatten)]
        io: IoArgs,
        /// Proposed meeting start
        #[arg(long)]
        start: String,
        /// Proposed meeting end
        #[arg(long)]
        end: String,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrivacyArg {
    Full,
    Opaque,
}

impl From<PrivacyArg> for PrivacyLevel {
    fn from(arg: PrivacyArg) -> Self {
        match arg {
            PrivacyArg::Full => PrivacyLevel::Full,
            PrivacyArg::Opaque => PrivacyLevel::Opaque,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let tz = parse_timezone(&cli.timezone).context("Invalid --timezone")?;
    debug!(timezone = tz.name(), "resolved timezone");

    match cli.command {
        Commands::Free { io, min_duration } => {
            let request: FreeBusyInput = read_json(io.input.as_deref())?;
            let (window, busy) = request.resolve(tz)?;

            let slots: Vec<FreeInterval> = match min_duration {
                Some(minutes) => {
                    let min_duration = minutes_arg(minutes, "--min-duration")?;
                    find_first_free_slot(&window, &busy, min_duration)
                        .context("Failed to find a free slot")?
                        .into_iter()
                        .collect()
                }
                None => {
                    compute_free_slots(&window, &busy).context("Failed to compute free slots")?
                }
            };
            info!(busy = busy.len(), free = slots.len(), "free slots computed");

            write_json(io.output.as_deref(), &FreeSlotDto::list(&slots, tz))?;
        }
        Commands::Merge { io, privacy } => {
            let request: CalendarsInput = read_json(io.input.as_deref())?;
            let (window, calendars) = request.resolve(tz)?;

            let unified = merge_availability(&calendars, &window, privacy.into())
                .context("Failed to merge calendars")?;
            info!(
                calendars = calendars.len(),
                busy = unified.busy.len(),
                free = unified.free.len(),
                "calendars merged"
            );

            write_json(io.output.as_deref(), &AvailabilityDto::new(&unified, tz))?;
        }
        Commands::Suggest {
            io,
            duration,
            limit,
        } => {
            let request: CalendarsInput = read_json(io.input.as_deref())?;
            let (window, calendars) = request.resolve(tz)?;

            let meeting = MeetingRequest {
                window,
                duration: minutes_arg(duration, "--duration")?,
                max_suggestions: limit,
            };
            let slots = suggest_meeting_times(&meeting, &calendars)
                .context("Failed to suggest meeting times")?;
            info!(suggestions = slots.len(), "meeting times suggested");

            write_json(io.output.as_deref(), &FreeSlotDto::list(&slots, tz))?;
        }
        Commands::Check { io, start, end } => {
            let request: CalendarsInput = read_json(io.input.as_deref())?;
            let (window, calendars) = request.resolve(tz)?;

            let proposed = BusyInterval {
                start: parse_timestamp(&start, tz).context("Invalid --start")?,
                end: parse_timestamp(&end, tz).context("Invalid --end")?,
            };
            let conflicts = check_proposed(&proposed, &window, &calendars)
                .context("Failed to check proposed meeting")?;
            info!(conflicts = conflicts.len(), "proposed meeting checked");

            let out: Vec<ConflictDto> = conflicts.iter().map(|c| ConflictDto::new(c, tz)).collect();
            write_json(io.output.as_deref(), &out)?;
        }
    }

    Ok(())
}

fn minutes_arg(value: i64, flag: &str) -> Result<Duration> {
    Duration::try_minutes(value).with_context(|| format!("{} is out of range: {}", flag, value))
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbosity: u8) -> Result<()> {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse input JSON")
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let mut pretty = serde_json::to_string_pretty(value)?;
    pretty.push('\n');
    write_output(path, &pretty)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
