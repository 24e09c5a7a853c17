//! Custom event CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use clinic_calendar_core::calendar::{CustomEventKind, NewCustomEvent};

/// Custom event management commands.
#[derive(Debug, Parser)]
pub struct CustomCommand {
    #[command(subcommand)]
    pub action: CustomAction,
}

/// CLI custom event kind (with clap ValueEnum).
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum EventKind {
    Meeting,
    ClinicClosed,
    Event,
    Training,
    #[default]
    Other,
}

impl From<EventKind> for CustomEventKind {
    fn from(k: EventKind) -> Self {
        match k {
            EventKind::Meeting => CustomEventKind::Meeting,
            EventKind::ClinicClosed => CustomEventKind::ClinicClosed,
            EventKind::Event => CustomEventKind::Event,
            EventKind::Training => CustomEventKind::Training,
            EventKind::Other => CustomEventKind::Other,
        }
    }
}

/// Available custom event actions.
#[derive(Debug, Subcommand)]
pub enum CustomAction {
    /// List stored custom events.
    List,
    /// Add a custom event.
    Add {
        /// Event title.
        #[arg(long)]
        title: String,
        /// Event date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Optional time (HH:MM).
        #[arg(long)]
        time: Option<String>,
        /// Event kind.
        #[arg(long, value_enum, default_value = "other")]
        kind: EventKind,
        /// Optional notes.
        #[arg(long)]
        notes: Option<String>,
        /// Author recorded with the event.
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Delete a custom event by ID.
    Delete {
        /// Event ID.
        #[arg(long)]
        id: String,
    },
}

/// Builds the creation request for an `add` action's arguments.
pub fn new_custom_event(
    title: String,
    date: NaiveDate,
    time: Option<String>,
    kind: EventKind,
    notes: Option<String>,
    created_by: Option<String>,
) -> NewCustomEvent {
    let mut request = NewCustomEvent::new(title, date).with_kind(kind.into());
    if let Some(time) = time {
        request = request.with_time(time);
    }
    if let Some(notes) = notes {
        request = request.with_notes(notes);
    }
    if let Some(created_by) = created_by {
        request = request.with_created_by(created_by);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_custom_event_maps_arguments() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let request = new_custom_event(
            "公休".to_string(),
            date,
            Some("9:00".to_string()),
            EventKind::ClinicClosed,
            None,
            Some("admin".to_string()),
        );

        assert_eq!(request.kind, CustomEventKind::ClinicClosed);
        assert_eq!(request.time.as_deref(), Some("9:00"));
        assert_eq!(request.notes, None);
        assert_eq!(request.created_by.as_deref(), Some("admin"));
    }
}
