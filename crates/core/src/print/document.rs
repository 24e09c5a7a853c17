//! Print projection: a flat, escaped description of what a printout shows.
//!
//! A [`PrintDocument`] owns all of its data and holds no references into application
//! state. Every free-text value is stored as [`EscapedText`].

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{compare_events, CalendarEvent, EventType, MonthCell, MonthGrid};

use super::escape::{escape_html, escape_optional, EscapedText};

/// Maximum events listed per printed day cell; the rest collapse into `+N more`.
/// Deliberately distinct from the on-screen dot threshold.
pub const PRINT_ITEM_LIMIT: usize = 3;

/// Column headers of the printed month, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// One legend entry: an event type and the caption printed next to its swatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub event_type: EventType,
    pub label: String,
}

/// Legend printed above the calendar body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }
}

impl Default for Legend {
    /// Every event type with its default caption.
    fn default() -> Self {
        Self::new(
            EventType::ALL
                .iter()
                .map(|event_type| LegendEntry {
                    event_type: *event_type,
                    label: event_type.default_label().to_string(),
                })
                .collect(),
        )
    }
}

/// What to project: a whole month grid or an explicit list of events.
#[derive(Debug, Clone, Copy)]
pub enum PrintSource<'a> {
    Month(&'a MonthGrid),
    Events {
        title: &'a str,
        events: &'a [CalendarEvent],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintLegendItem {
    pub css_class: &'static str,
    pub label: EscapedText,
}

/// One printed event line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintItem {
    pub css_class: &'static str,
    pub time: EscapedText,
    pub label: EscapedText,
    pub doctor: EscapedText,
    pub notes: EscapedText,
}

impl PrintItem {
    fn from_event(event: &CalendarEvent) -> Self {
        Self {
            css_class: event.event_type.css_class(),
            time: escape_html(&event.time),
            label: escape_html(&event.label),
            doctor: escape_optional(event.doctor.as_deref()),
            notes: escape_optional(event.notes.as_deref()),
        }
    }
}

/// One printed cell of the month table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrintCell {
    Blank,
    Day {
        day: u32,
        date: String,
        is_holiday: bool,
        items: Vec<PrintItem>,
        /// Events beyond [`PRINT_ITEM_LIMIT`] that are not listed.
        overflow: usize,
    },
}

impl PrintCell {
    /// The `+N more` indicator, if any events were left out.
    pub fn overflow_label(&self) -> Option<String> {
        match self {
            PrintCell::Day { overflow, .. } if *overflow > 0 => Some(format!("+{overflow} more")),
            _ => None,
        }
    }
}

/// One date of a printed agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintAgendaDay {
    pub date: String,
    pub weekday: &'static str,
    pub items: Vec<PrintItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrintBody {
    /// Row-major weeks, same cell order as the on-screen grid.
    Month {
        weekdays: [&'static str; 7],
        rows: Vec<Vec<PrintCell>>,
    },
    Agenda { days: Vec<PrintAgendaDay> },
}

/// Self-contained, escaped description of a printout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub title: EscapedText,
    pub legend: Vec<PrintLegendItem>,
    pub body: PrintBody,
    /// Number of events covered by the document, listed or collapsed.
    pub total_events: usize,
}

/// Projects a month grid or an event list into a print document.
pub fn build_print_projection(source: PrintSource<'_>, legend: &Legend) -> PrintDocument {
    let legend = legend
        .entries()
        .iter()
        .map(|entry| PrintLegendItem {
            css_class: entry.event_type.css_class(),
            label: escape_html(&entry.label),
        })
        .collect();

    match source {
        PrintSource::Month(grid) => {
            let rows: Vec<Vec<PrintCell>> = grid
                .weeks()
                .map(|week| week.iter().map(print_cell).collect())
                .collect();
            PrintDocument {
                title: escape_html(&grid.cursor.label()),
                legend,
                body: PrintBody::Month {
                    weekdays: WEEKDAY_HEADERS,
                    rows,
                },
                total_events: grid.day_cells().map(|cell| cell.events.len()).sum(),
            }
        }
        PrintSource::Events { title, events } => PrintDocument {
            title: escape_html(title),
            legend,
            body: PrintBody::Agenda {
                days: agenda_days(events),
            },
            total_events: events.len(),
        },
    }
}

fn print_cell(cell: &MonthCell) -> PrintCell {
    match cell {
        MonthCell::Blank => PrintCell::Blank,
        MonthCell::Day(day) => PrintCell::Day {
            day: day.day,
            date: day.date.to_string(),
            is_holiday: day
                .events
                .iter()
                .any(|event| event.event_type == EventType::Holiday),
            items: day
                .events
                .iter()
                .take(PRINT_ITEM_LIMIT)
                .map(PrintItem::from_event)
                .collect(),
            overflow: day.events.len().saturating_sub(PRINT_ITEM_LIMIT),
        },
    }
}

/// Groups events by date, ordering dates ascending and each day as the index does.
fn agenda_days(events: &[CalendarEvent]) -> Vec<PrintAgendaDay> {
    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| compare_events(a, b)));

    let mut days: Vec<(NaiveDate, Vec<PrintItem>)> = Vec::new();
    for event in sorted {
        match days.last_mut() {
            Some((date, items)) if *date == event.date => items.push(PrintItem::from_event(event)),
            _ => days.push((event.date, vec![PrintItem::from_event(event)])),
        }
    }

    days.into_iter()
        .map(|(date, items)| PrintAgendaDay {
            date: date.to_string(),
            weekday: WEEKDAY_HEADERS[date.weekday().num_days_from_sunday() as usize],
            items,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{month_grid, DateIndex, MonthCursor};

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn busy_day_grid() -> MonthGrid {
        let date = make_date(2026, 3, 10);
        let events = (0..5).map(|n| {
            CalendarEvent::new(EventType::Booking, format!("b{n}"), date, format!("病人{n}"))
                .with_time(format!("1{n}:00"))
        });
        let mut events: Vec<CalendarEvent> = events.collect();
        events[4].label = "<script>alert(1)</script>".to_string();
        events[0].label = "<script>x</script>".to_string();

        month_grid(&DateIndex::build(events), MonthCursor::new(2026, 2).unwrap())
    }

    fn day_cell(document: &PrintDocument, date: &str) -> PrintCell {
        match &document.body {
            PrintBody::Month { rows, .. } => rows
                .iter()
                .flatten()
                .find(|cell| matches!(cell, PrintCell::Day { date: d, .. } if d == date))
                .cloned()
                .unwrap(),
            PrintBody::Agenda { .. } => panic!("expected a month body"),
        }
    }

    #[test]
    fn test_busy_cell_lists_three_items_and_overflow() {
        let grid = busy_day_grid();
        let document = build_print_projection(PrintSource::Month(&grid), &Legend::default());
        let cell = day_cell(&document, "2026-03-10");

        match &cell {
            PrintCell::Day { items, overflow, .. } => {
                assert_eq!(items.len(), 3);
                assert_eq!(*overflow, 2);
                assert_eq!(items[0].time.as_str(), "10:00");
            }
            PrintCell::Blank => panic!("expected a day cell"),
        }
        assert_eq!(cell.overflow_label(), Some("+2 more".to_string()));
        assert_eq!(document.total_events, 5);
    }

    #[test]
    fn test_labels_are_escaped() {
        let grid = busy_day_grid();
        let document = build_print_projection(PrintSource::Month(&grid), &Legend::default());

        match day_cell(&document, "2026-03-10") {
            PrintCell::Day { items, .. } => {
                assert_eq!(items[0].label.as_str(), "&lt;script&gt;x&lt;/script&gt;");
            }
            PrintCell::Blank => panic!("expected a day cell"),
        }
        let json = serde_json::to_string(&document).unwrap();
        assert!(!json.contains("<script>"));
    }

    #[test]
    fn test_month_rows_follow_grid_order() {
        let grid = busy_day_grid();
        let document = build_print_projection(PrintSource::Month(&grid), &Legend::default());

        match &document.body {
            PrintBody::Month { rows, weekdays } => {
                assert_eq!(weekdays[0], "日");
                assert_eq!(rows.len() * 7, grid.cells.len());
                let printed: Vec<Option<u32>> = rows
                    .iter()
                    .flatten()
                    .map(|cell| match cell {
                        PrintCell::Day { day, .. } => Some(*day),
                        PrintCell::Blank => None,
                    })
                    .collect();
                let expected: Vec<Option<u32>> = grid
                    .cells
                    .iter()
                    .map(|cell| cell.as_day().map(|day| day.day))
                    .collect();
                assert_eq!(printed, expected);
            }
            PrintBody::Agenda { .. } => panic!("expected a month body"),
        }
        assert_eq!(document.title.as_str(), "2026年3月");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let grid = busy_day_grid();
        let legend = Legend::default();

        assert_eq!(
            build_print_projection(PrintSource::Month(&grid), &legend),
            build_print_projection(PrintSource::Month(&grid), &legend)
        );
    }

    #[test]
    fn test_missing_optional_fields_render_empty() {
        let date = make_date(2026, 3, 10);
        let events = vec![CalendarEvent::new(EventType::Holiday, "h", date, "院慶")];
        let document = build_print_projection(
            PrintSource::Events {
                title: "三月",
                events: &events,
            },
            &Legend::default(),
        );

        match &document.body {
            PrintBody::Agenda { days } => {
                assert_eq!(days.len(), 1);
                assert_eq!(days[0].weekday, "二");
                let item = &days[0].items[0];
                assert!(item.doctor.is_empty());
                assert!(item.notes.is_empty());
                assert!(item.time.is_empty());
                assert_eq!(item.css_class, "holiday");
            }
            PrintBody::Month { .. } => panic!("expected an agenda body"),
        }
    }

    #[test]
    fn test_agenda_groups_and_orders_events() {
        let events = vec![
            CalendarEvent::new(EventType::Custom, "c", make_date(2026, 3, 11), "late")
                .with_time("15:00"),
            CalendarEvent::new(EventType::Booking, "b", make_date(2026, 3, 10), "b")
                .with_time("10:00"),
            CalendarEvent::new(EventType::Custom, "a", make_date(2026, 3, 11), "early")
                .with_time("09:00"),
        ];
        let document = build_print_projection(
            PrintSource::Events {
                title: "<b>agenda</b>",
                events: &events,
            },
            &Legend::default(),
        );

        assert_eq!(document.title.as_str(), "&lt;b&gt;agenda&lt;/b&gt;");
        match &document.body {
            PrintBody::Agenda { days } => {
                assert_eq!(days.len(), 2);
                assert_eq!(days[0].date, "2026-03-10");
                let labels: Vec<&str> = days[1].items.iter().map(|i| i.label.as_str()).collect();
                assert_eq!(labels, vec!["early", "late"]);
            }
            PrintBody::Month { .. } => panic!("expected an agenda body"),
        }
    }

    #[test]
    fn test_legend_is_escaped() {
        let legend = Legend::new(vec![LegendEntry {
            event_type: EventType::Custom,
            label: "A & B".to_string(),
        }]);
        let document = build_print_projection(PrintSource::Month(&busy_day_grid()), &legend);

        assert_eq!(document.legend.len(), 1);
        assert_eq!(document.legend[0].label.as_str(), "A &amp; B");
        assert_eq!(document.legend[0].css_class, "custom");
    }
}
