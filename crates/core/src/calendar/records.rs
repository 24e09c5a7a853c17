//! Source record shapes consumed by the calendar.
//!
//! Bookings, queue tickets and leave spans are owned by other parts of the clinic
//! system; their fields are optional because upstream data is not validated here.
//! Custom events are the only records this crate creates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::error::EventError;
use super::normalize::{canonical_time, parse_iso_date};

/// Identifier as written upstream: JS-origin data mixes strings and numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

fn deserialize_stored_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unresolvable date: {raw}")))
}

/// An appointment booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub patient_name: Option<String>,
    pub doctor: Option<String>,
    pub store: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

/// A walk-in queue ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueRecord {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub check_in_time: Option<String>,
    pub patient_name: Option<String>,
    pub doctor: Option<String>,
    pub store: Option<String>,
    pub status: Option<String>,
    /// Ticket number; upstream stores it as either a number or a string.
    pub queue_no: Option<serde_json::Value>,
}

/// A staff leave span. Single-day leave may only carry `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveRecord {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub date: Option<String>,
    pub staff_name: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub leave_type: Option<String>,
}

/// Kind of a user-authored calendar event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomEventKind {
    Meeting,
    #[serde(rename = "Clinic-Closed")]
    ClinicClosed,
    Event,
    Training,
    #[default]
    Other,
}

impl CustomEventKind {
    /// Returns the stored name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomEventKind::Meeting => "Meeting",
            CustomEventKind::ClinicClosed => "Clinic-Closed",
            CustomEventKind::Event => "Event",
            CustomEventKind::Training => "Training",
            CustomEventKind::Other => "Other",
        }
    }
}

/// A user-authored event persisted through the key-value port.
///
/// Stored events may predate this crate: ids are kept verbatim (string or number)
/// and `createdAt` may be absent. Only the date has to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEvent {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "deserialize_stored_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type", default)]
    pub kind: CustomEventKind,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a custom event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomEvent {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: CustomEventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl NewCustomEvent {
    /// Create a new request with a title and date.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            time: None,
            kind: CustomEventKind::default(),
            notes: None,
            created_by: None,
        }
    }

    /// Set the event time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set the event kind.
    pub fn with_kind(mut self, kind: CustomEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the event notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the author of the event.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Validate and convert into a stored event with a fresh ID.
    pub fn into_event(self, created_at: DateTime<Utc>) -> Result<CustomEvent, EventError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(EventError::EmptyTitle);
        }
        if title.chars().count() > 200 {
            return Err(EventError::TitleTooLong);
        }

        let time = match self.time.as_deref().map(str::trim) {
            None | Some("") => String::new(),
            Some(raw) => match canonical_time(raw) {
                Some(time) => time,
                None => return Err(EventError::InvalidTime(raw.to_string())),
            },
        };

        Ok(CustomEvent {
            id: Uuid::new_v4().to_string(),
            title,
            date: self.date,
            time,
            kind: self.kind,
            notes: self.notes.unwrap_or_default(),
            created_by: self.created_by.unwrap_or_default(),
            created_at: Some(created_at),
        })
    }
}
