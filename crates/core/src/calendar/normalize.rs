//! Adapters from source records to canonical [`CalendarEvent`]s.
//!
//! One function per source type. Records without a resolvable date yield `None`;
//! upstream owners are responsible for the validity of their own records.

use chrono::{NaiveDate, NaiveTime};

use super::records::{BookingRecord, CustomEvent, QueueRecord};
use super::types::{CalendarEvent, EventType};

/// Parses a `YYYY-MM-DD` date. A trailing timestamp (`T...` or ` ...`) is ignored.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = match raw.get(10..11) {
        Some("T") | Some(" ") => &raw[..10],
        _ => raw,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parses `H:MM`, `HH:MM` or `HH:MM:SS` into a time of day.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.trim().split(':');
    let hour: u32 = parse_clock_field(parts.next()?, 1)?;
    let minute: u32 = parse_clock_field(parts.next()?, 2)?;
    let second: u32 = match parts.next() {
        Some(field) => parse_clock_field(field, 2)?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn parse_clock_field(field: &str, min_width: usize) -> Option<u32> {
    if field.len() < min_width || field.len() > 2 || !field.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Returns the canonical `HH:MM` form of a clock time, if it is one.
pub fn canonical_time(raw: &str) -> Option<String> {
    parse_clock_time(raw).map(|time| time.format("%H:%M").to_string())
}

/// Canonicalizes clock times and keeps any other non-empty text verbatim.
pub fn normalize_time(raw: &str) -> String {
    let trimmed = raw.trim();
    canonical_time(trimmed).unwrap_or_else(|| trimmed.to_string())
}

/// Returns the trimmed value if it is present and not blank.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the record's own id, or a positional id unique within its stream.
pub(crate) fn source_id(id: &Option<String>, event_type: EventType, position: usize) -> String {
    match non_empty(id) {
        Some(id) => format!("{}-{}", event_type.css_class(), id),
        None => format!("{}-{}", event_type.css_class(), position),
    }
}

/// Normalizes a booking. `position` is the record's index in its stream.
pub fn normalize_booking(record: &BookingRecord, position: usize) -> Option<CalendarEvent> {
    let date = parse_iso_date(non_empty(&record.date)?)?;
    let label = non_empty(&record.patient_name).unwrap_or(EventType::Booking.default_label());

    let mut event = CalendarEvent::new(
        EventType::Booking,
        source_id(&record.id, EventType::Booking, position),
        date,
        label,
    )
    .with_time(normalize_time(record.time.as_deref().unwrap_or_default()));
    event.doctor = non_empty(&record.doctor).map(str::to_string);
    event.notes = non_empty(&record.notes).map(str::to_string);
    event.status = non_empty(&record.status).map(str::to_string);
    Some(event)
}

/// Normalizes a queue ticket, falling back to the check-in time when no time is set.
pub fn normalize_queue(record: &QueueRecord, position: usize) -> Option<CalendarEvent> {
    let date = parse_iso_date(non_empty(&record.date)?)?;
    let label = non_empty(&record.patient_name).unwrap_or(EventType::Queue.default_label());
    let time = non_empty(&record.time)
        .or_else(|| non_empty(&record.check_in_time))
        .unwrap_or_default();

    let mut event = CalendarEvent::new(
        EventType::Queue,
        source_id(&record.id, EventType::Queue, position),
        date,
        label,
    )
    .with_time(normalize_time(time));
    event.doctor = non_empty(&record.doctor).map(str::to_string);
    event.status = non_empty(&record.status).map(str::to_string);
    Some(event)
}

/// Normalizes one holiday table entry.
pub fn normalize_holiday(date: NaiveDate, name: &str) -> CalendarEvent {
    CalendarEvent::new(
        EventType::Holiday,
        format!("{}-{}", EventType::Holiday.css_class(), date),
        date,
        name,
    )
}

/// Normalizes a custom event, copying its fields verbatim.
pub fn normalize_custom(record: &CustomEvent) -> CalendarEvent {
    let mut event = CalendarEvent::new(
        EventType::Custom,
        record.id.clone(),
        record.date,
        record.title.clone(),
    )
    .with_time(record.time.clone())
    .with_category(record.kind.as_str());
    if !record.notes.is_empty() {
        event.notes = Some(record.notes.clone());
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::records::CustomEventKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn booking(date: &str, time: &str, patient: Option<&str>) -> BookingRecord {
        BookingRecord {
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            patient_name: patient.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2026-03-10"), Some(make_date(2026, 3, 10)));
        assert_eq!(
            parse_iso_date("2026-03-10T08:30:00.000Z"),
            Some(make_date(2026, 3, 10))
        );
        assert_eq!(parse_iso_date(" 2024-02-29 "), Some(make_date(2024, 2, 29)));
        assert_eq!(parse_iso_date("2023-02-29"), None);
        assert_eq!(parse_iso_date("10/03/2026"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_clock_time("14:30:15"), NaiveTime::from_hms_opt(14, 30, 15));
        assert_eq!(parse_clock_time("24:00"), None);
        assert_eq!(parse_clock_time("9:5"), None);
        assert_eq!(parse_clock_time("morning"), None);
        assert_eq!(parse_clock_time("10:00:00:00"), None);
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("9:30"), "09:30");
        assert_eq!(normalize_time("10:00:00"), "10:00");
        assert_eq!(normalize_time("  "), "");
        assert_eq!(normalize_time("afternoon"), "afternoon");
    }

    #[test]
    fn test_normalize_booking() {
        let mut record = booking("2026-03-10", "10:00", Some("林美華"));
        record.doctor = Some("陳醫師".to_string());
        record.notes = Some("複診".to_string());
        record.store = Some("台北店".to_string());

        let event = normalize_booking(&record, 3).unwrap();

        assert_eq!(event.event_type, EventType::Booking);
        assert_eq!(event.date, make_date(2026, 3, 10));
        assert_eq!(event.time, "10:00");
        assert_eq!(event.label, "林美華");
        assert_eq!(event.doctor.as_deref(), Some("陳醫師"));
        assert_eq!(event.notes.as_deref(), Some("複診"));
        assert_eq!(event.source_id, "booking-3");
    }

    #[test]
    fn test_normalize_booking_default_label() {
        let event = normalize_booking(&booking("2026-03-10", "10:00", None), 0).unwrap();
        assert_eq!(event.label, "預約");

        let event = normalize_booking(&booking("2026-03-10", "10:00", Some("  ")), 0).unwrap();
        assert_eq!(event.label, "預約");
    }

    #[test]
    fn test_normalize_booking_uses_record_id() {
        let mut record = booking("2026-03-10", "10:00", None);
        record.id = Some("b42".to_string());

        let event = normalize_booking(&record, 9).unwrap();
        assert_eq!(event.source_id, "booking-b42");
    }

    #[test]
    fn test_records_without_date_are_dropped() {
        let mut record = booking("", "10:00", None);
        assert!(normalize_booking(&record, 0).is_none());

        record.date = None;
        assert!(normalize_booking(&record, 0).is_none());

        record.date = Some("not a date".to_string());
        assert!(normalize_booking(&record, 0).is_none());

        assert!(normalize_queue(&QueueRecord::default(), 0).is_none());
    }

    #[test]
    fn test_normalize_queue_time_fallback() {
        let record = QueueRecord {
            date: Some("2026-03-10".to_string()),
            check_in_time: Some("9:12".to_string()),
            ..Default::default()
        };
        let event = normalize_queue(&record, 0).unwrap();

        assert_eq!(event.time, "09:12");
        assert_eq!(event.label, "掛號");

        let record = QueueRecord {
            date: Some("2026-03-10".to_string()),
            time: Some("10:00".to_string()),
            check_in_time: Some("9:12".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_queue(&record, 0).unwrap().time, "10:00");

        let record = QueueRecord {
            date: Some("2026-03-10".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_queue(&record, 0).unwrap().time, "");
    }

    #[test]
    fn test_normalize_holiday() {
        let event = normalize_holiday(make_date(2026, 10, 10), "國慶日");

        assert_eq!(event.event_type, EventType::Holiday);
        assert_eq!(event.time, "");
        assert_eq!(event.label, "國慶日");
        assert_eq!(event.source_id, "holiday-2026-10-10");
    }

    #[test]
    fn test_normalize_custom() {
        let id = Uuid::new_v4().to_string();
        let record = CustomEvent {
            id: id.clone(),
            title: "院內訓練".to_string(),
            date: make_date(2026, 3, 12),
            time: "14:00".to_string(),
            kind: CustomEventKind::Training,
            notes: "三樓會議室".to_string(),
            created_by: "admin".to_string(),
            created_at: Some(Utc::now()),
        };

        let event = normalize_custom(&record);

        assert_eq!(event.id, id);
        assert_eq!(event.source_id, id);
        assert_eq!(event.label, "院內訓練");
        assert_eq!(event.time, "14:00");
        assert_eq!(event.notes.as_deref(), Some("三樓會議室"));
        assert_eq!(event.category.as_deref(), Some("Training"));
    }
}
