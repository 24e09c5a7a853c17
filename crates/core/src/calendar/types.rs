use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::normalize::parse_clock_time;

/// The source stream an event was projected from.
///
/// The declaration order is the source-merge order used to break ties between events
/// that share a date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Booking,
    Queue,
    Leave,
    Holiday,
    Custom,
}

impl EventType {
    /// All event types in source-merge order.
    pub const ALL: [EventType; 5] = [
        EventType::Booking,
        EventType::Queue,
        EventType::Leave,
        EventType::Holiday,
        EventType::Custom,
    ];

    /// Returns the merge priority for this type.
    /// Lower values win ties between events at the same time.
    pub fn merge_order(&self) -> u8 {
        match self {
            EventType::Booking => 0,
            EventType::Queue => 1,
            EventType::Leave => 2,
            EventType::Holiday => 3,
            EventType::Custom => 4,
        }
    }

    /// Returns the CSS class name for this event type.
    pub fn css_class(&self) -> &'static str {
        match self {
            EventType::Booking => "booking",
            EventType::Queue => "queue",
            EventType::Leave => "leave",
            EventType::Holiday => "holiday",
            EventType::Custom => "custom",
        }
    }

    /// Returns the label shown in legends and used when a record has no name.
    pub fn default_label(&self) -> &'static str {
        match self {
            EventType::Booking => "預約",
            EventType::Queue => "掛號",
            EventType::Leave => "請假",
            EventType::Holiday => "國定假日",
            EventType::Custom => "自訂事件",
        }
    }
}

/// The canonical, source-agnostic event used by the index and every projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    /// Canonical `HH:MM`, free text, or empty for untimed events.
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Sub-kind supplied by the source (leave type, custom event kind).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Links every day of an expanded span back to one originating record.
    pub source_id: String,
}

impl CalendarEvent {
    /// Creates an untimed event whose id equals its source id.
    pub fn new(
        event_type: EventType,
        source_id: impl Into<String>,
        date: NaiveDate,
        label: impl Into<String>,
    ) -> Self {
        let source_id = source_id.into();
        Self {
            id: source_id.clone(),
            date,
            time: String::new(),
            event_type,
            label: label.into(),
            doctor: None,
            notes: None,
            status: None,
            category: None,
            source_id,
        }
    }

    /// Sets a specific ID for this event.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the time of this event.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Sets the doctor for this event.
    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }

    /// Sets the notes for this event.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the status for this event.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the category for this event.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns true if this event has no time of day.
    pub fn is_untimed(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the parsed time of day, if the time is a clock value.
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.time)
    }
}
