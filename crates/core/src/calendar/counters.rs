use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::grid::MonthGrid;
use super::types::{CalendarEvent, EventType};

/// Days with at most this many events show one dot per event type; busier days show
/// the count instead. Deliberately distinct from the print cutoff.
pub const DOT_THRESHOLD: usize = 4;

/// Summary marker for a day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DayBadge {
    Empty,
    /// One marker per distinct event type, in order of first appearance.
    Dots(Vec<EventType>),
    Count(usize),
}

/// Computes the badge for a day's events.
pub fn day_badge(events: &[CalendarEvent]) -> DayBadge {
    if events.is_empty() {
        return DayBadge::Empty;
    }
    if events.len() > DOT_THRESHOLD {
        return DayBadge::Count(events.len());
    }

    let mut types = Vec::with_capacity(events.len());
    for event in events {
        if !types.contains(&event.event_type) {
            types.push(event.event_type);
        }
    }
    DayBadge::Dots(types)
}

/// Total number of events over every day cell of the grid, holidays included.
pub fn month_total(grid: &MonthGrid) -> usize {
    grid.day_cells().map(|cell| cell.events.len()).sum()
}

/// Event totals for a displayed month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub total: usize,
    pub by_type: BTreeMap<EventType, usize>,
    /// Number of days with at least one event.
    pub busy_days: usize,
}

/// Computes totals per event type for a grid.
pub fn month_summary(grid: &MonthGrid) -> MonthSummary {
    let mut summary = MonthSummary::default();

    for cell in grid.day_cells() {
        if !cell.events.is_empty() {
            summary.busy_days += 1;
        }
        for event in &cell.events {
            *summary.by_type.entry(event.event_type).or_default() += 1;
        }
    }
    summary.total = summary.by_type.values().sum();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::grid::{month_grid, MonthCursor};
    use crate::calendar::index::DateIndex;
    use chrono::NaiveDate;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(event_type: EventType, date: NaiveDate, n: usize) -> CalendarEvent {
        CalendarEvent::new(event_type, format!("{}-{n}", event_type.css_class()), date, "x")
    }

    #[test]
    fn test_four_distinct_types_show_dots() {
        let date = make_date(2026, 3, 10);
        let events = vec![
            event(EventType::Booking, date, 0),
            event(EventType::Queue, date, 1),
            event(EventType::Leave, date, 2),
            event(EventType::Custom, date, 3),
        ];

        assert_eq!(
            day_badge(&events),
            DayBadge::Dots(vec![
                EventType::Booking,
                EventType::Queue,
                EventType::Leave,
                EventType::Custom
            ])
        );
    }

    #[test]
    fn test_dots_are_deduplicated_by_type() {
        let date = make_date(2026, 3, 10);
        let events = vec![
            event(EventType::Queue, date, 0),
            event(EventType::Booking, date, 1),
            event(EventType::Queue, date, 2),
            event(EventType::Booking, date, 3),
        ];

        assert_eq!(
            day_badge(&events),
            DayBadge::Dots(vec![EventType::Queue, EventType::Booking])
        );
    }

    #[test]
    fn test_five_events_show_count() {
        let date = make_date(2026, 3, 10);
        let events: Vec<CalendarEvent> =
            (0..5).map(|n| event(EventType::Booking, date, n)).collect();

        assert_eq!(day_badge(&events), DayBadge::Count(5));
    }

    #[test]
    fn test_empty_day_badge() {
        assert_eq!(day_badge(&[]), DayBadge::Empty);
    }

    #[test]
    fn test_month_total_includes_holidays_and_ignores_other_months() {
        let index = DateIndex::build(vec![
            event(EventType::Booking, make_date(2026, 3, 1), 0),
            event(EventType::Holiday, make_date(2026, 3, 1), 1),
            event(EventType::Leave, make_date(2026, 3, 31), 2),
            event(EventType::Booking, make_date(2026, 4, 1), 3),
            event(EventType::Booking, make_date(2026, 2, 28), 4),
        ]);
        let grid = month_grid(&index, MonthCursor::new(2026, 2).unwrap());

        assert_eq!(month_total(&grid), 3);

        let summary = month_summary(&grid);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.busy_days, 2);
        assert_eq!(summary.by_type.get(&EventType::Booking), Some(&1));
        assert_eq!(summary.by_type.get(&EventType::Holiday), Some(&1));
        assert_eq!(summary.by_type.get(&EventType::Queue), None);
    }
}
