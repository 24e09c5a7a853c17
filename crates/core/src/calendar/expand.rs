use chrono::NaiveDate;

use super::normalize::{non_empty, parse_iso_date, source_id};
use super::records::LeaveRecord;
use super::types::{CalendarEvent, EventType};

/// Expands a span into one event per calendar day, inclusive of both ends.
///
/// Every produced event is a copy of `template` dated to its day, keeping the
/// template's `source_id` and getting a per-day `id`. Returns an empty vector when
/// `end` is before `start`.
pub fn expand_range(
    start: NaiveDate,
    end: NaiveDate,
    template: &CalendarEvent,
) -> Vec<CalendarEvent> {
    let mut expanded = Vec::new();
    let mut current = Some(start);

    while let Some(day) = current.filter(|day| *day <= end) {
        let mut event = template.clone();
        event.date = day;
        event.id = format!("{}-{}", template.source_id, day);
        expanded.push(event);
        current = day.succ_opt();
    }

    expanded
}

/// Expands a leave record into one event per day of leave.
///
/// The span is `startDate|date` to `endDate|date`; a missing end means a single day.
pub fn expand_leave(record: &LeaveRecord, position: usize) -> Vec<CalendarEvent> {
    let Some(start) = non_empty(&record.start_date)
        .or_else(|| non_empty(&record.date))
        .and_then(parse_iso_date)
    else {
        return Vec::new();
    };
    let end = non_empty(&record.end_date)
        .or_else(|| non_empty(&record.date))
        .and_then(parse_iso_date)
        .unwrap_or(start);

    let label = non_empty(&record.staff_name)
        .or_else(|| non_empty(&record.user_id))
        .unwrap_or(EventType::Leave.default_label());

    let mut template = CalendarEvent::new(
        EventType::Leave,
        source_id(&record.id, EventType::Leave, position),
        start,
        label,
    );
    template.category = non_empty(&record.leave_type).map(str::to_string);

    expand_range(start, end, &template)
}
