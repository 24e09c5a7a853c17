//! CLI command definitions.

pub mod custom;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clinic_calendar_core::calendar::EventType;

/// Clinic calendar: month, week and day views over clinic schedule data.
#[derive(Debug, Parser)]
#[command(name = "clinic-calendar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding bookings.json, queue.json, leaves.json and the event store.
    #[arg(long, env = "CLINIC_CALENDAR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// CLI event type for filtering (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventTypeArg {
    Booking,
    Queue,
    Leave,
    Holiday,
    Custom,
}

impl From<EventTypeArg> for EventType {
    fn from(t: EventTypeArg) -> Self {
        match t {
            EventTypeArg::Booking => EventType::Booking,
            EventTypeArg::Queue => EventType::Queue,
            EventTypeArg::Leave => EventType::Leave,
            EventTypeArg::Holiday => EventType::Holiday,
            EventTypeArg::Custom => EventType::Custom,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a month grid with per-day badges and totals.
    Month {
        /// Year (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,
        /// Month, 1-12 (defaults to the current month).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Write a printable HTML page to this file.
        #[arg(long)]
        print: Option<PathBuf>,
    },
    /// Show the Sunday-first week containing a date.
    Week {
        /// Reference date (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List the events of one day.
    Day {
        /// Date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Only these event types (repeatable).
        #[arg(long = "type", value_enum)]
        types: Vec<EventTypeArg>,
        /// Only bookings and queue entries for this doctor.
        #[arg(long)]
        doctor: Option<String>,
        /// Write a printable HTML agenda to this file.
        #[arg(long)]
        print: Option<PathBuf>,
    },
    /// Custom event management.
    Custom(custom::CustomCommand),
}
