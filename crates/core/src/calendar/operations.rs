use serde::{Deserialize, Serialize};

use super::types::{CalendarEvent, EventType};

/// Narrows which events feed a view. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only events of these types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<EventType>,
    /// Only events assigned to this doctor. Untimed types (leave, holiday, custom)
    /// carry no doctor and are kept so the view still shows closures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
}

impl EventFilter {
    /// Creates a filter that matches every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to the given types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = EventType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Restricts the filter to one doctor.
    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }

    /// Returns true if the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.doctor.is_none()
    }

    /// Returns true if the event passes the filter.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        let type_ok = self.types.is_empty() || self.types.contains(&event.event_type);
        let doctor_ok = match (&self.doctor, event.event_type) {
            (None, _) => true,
            (Some(_), EventType::Leave | EventType::Holiday | EventType::Custom) => true,
            (Some(doctor), _) => event.doctor.as_deref() == Some(doctor.as_str()),
        };
        type_ok && doctor_ok
    }
}

/// Returns the events that pass the filter, preserving order.
pub fn filter_events(events: Vec<CalendarEvent>, filter: &EventFilter) -> Vec<CalendarEvent> {
    if filter.is_empty() {
        return events;
    }
    events.into_iter().filter(|event| filter.matches(event)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_events() -> Vec<CalendarEvent> {
        let date = make_date(2026, 3, 10);
        vec![
            CalendarEvent::new(EventType::Booking, "b1", date, "A").with_doctor("陳醫師"),
            CalendarEvent::new(EventType::Booking, "b2", date, "B").with_doctor("林醫師"),
            CalendarEvent::new(EventType::Queue, "q1", date, "C"),
            CalendarEvent::new(EventType::Holiday, "h1", date, "D"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filtered = filter_events(sample_events(), &EventFilter::new());
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_filter_by_type() {
        let filter = EventFilter::new().with_types([EventType::Booking, EventType::Holiday]);
        let labels: Vec<String> = filter_events(sample_events(), &filter)
            .into_iter()
            .map(|e| e.label)
            .collect();

        assert_eq!(labels, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_filter_by_doctor_keeps_untimed_sources() {
        let filter = EventFilter::new().with_doctor("陳醫師");
        let labels: Vec<String> = filter_events(sample_events(), &filter)
            .into_iter()
            .map(|e| e.label)
            .collect();

        assert_eq!(labels, vec!["A", "D"]);
    }
}
