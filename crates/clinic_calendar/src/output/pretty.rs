//! Pretty output formatting.

use chrono::{Datelike, NaiveDate};
use clinic_calendar_core::calendar::{
    day_badge, CalendarEvent, CustomEvent, DayBadge, EventType, MonthCell, MonthGrid,
    MonthSummary, WeekGrid,
};
use clinic_calendar_core::print::WEEKDAY_HEADERS;

const CELL_WIDTH: usize = 8;

/// Single-letter marker used for badge dots.
fn type_marker(event_type: EventType) -> char {
    match event_type {
        EventType::Booking => 'B',
        EventType::Queue => 'Q',
        EventType::Leave => 'L',
        EventType::Holiday => 'H',
        EventType::Custom => 'C',
    }
}

fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_HEADERS[date.weekday().num_days_from_sunday() as usize]
}

/// Format a badge as it appears in a month cell.
pub fn format_badge(badge: &DayBadge) -> String {
    match badge {
        DayBadge::Empty => String::new(),
        DayBadge::Dots(types) => types.iter().copied().map(type_marker).collect(),
        DayBadge::Count(count) => format!("({count})"),
    }
}

/// Format a month grid with badges, followed by totals.
pub fn format_month(grid: &MonthGrid, summary: &MonthSummary, today: NaiveDate) -> String {
    let mut output = format!("{}\n", grid.cursor.label());
    for header in WEEKDAY_HEADERS {
        // CJK headers occupy two columns.
        output.push_str(header);
        output.push_str(&" ".repeat(CELL_WIDTH - 2));
    }
    output.push('\n');
    output.push_str(&"-".repeat(CELL_WIDTH * 7));

    for week in grid.weeks() {
        output.push('\n');
        for cell in week {
            let text = match cell {
                MonthCell::Blank => String::new(),
                MonthCell::Day(day) => {
                    let marker = if day.date == today { "*" } else { "" };
                    format!("{}{marker}{}", day.day, format_badge(&day_badge(&day.events)))
                }
            };
            output.push_str(&format!("{text:<width$}", width = CELL_WIDTH));
        }
    }

    output.push('\n');
    output.push_str(&format_summary(summary));
    output
}

/// Format month totals.
pub fn format_summary(summary: &MonthSummary) -> String {
    let mut output = format!(
        "Total: {} events on {} days",
        summary.total, summary.busy_days
    );
    for (event_type, count) in &summary.by_type {
        output.push_str(&format!("\n  {}: {}", event_type.default_label(), count));
    }
    output
}

/// Format one event on a single line.
pub fn format_event(event: &CalendarEvent) -> String {
    let time = if event.is_untimed() {
        "--:--"
    } else {
        event.time.as_str()
    };
    let mut output = format!(
        "{time:<5} [{}] {}",
        event.event_type.css_class(),
        event.label
    );
    if let Some(doctor) = &event.doctor {
        output.push_str(&format!(" ({doctor})"));
    }
    if let Some(category) = &event.category {
        output.push_str(&format!(" <{category}>"));
    }
    if let Some(status) = &event.status {
        output.push_str(&format!(" {status}"));
    }
    output
}

/// Format the events of one day.
pub fn format_day(date: NaiveDate, events: &[CalendarEvent]) -> String {
    let mut output = format!("{date} ({})", weekday_name(date));
    if events.is_empty() {
        output.push_str("\n  No events.");
        return output;
    }
    for event in events {
        output.push_str(&format!("\n  {}", format_event(event)));
    }
    output
}

/// Format a week view: slotted events per day, then untimed ones.
pub fn format_week(grid: &WeekGrid) -> String {
    let mut output = format!("Week of {}", grid.start);
    for day in &grid.days {
        output.push_str(&format!(
            "\n\n{} ({}) - {} events",
            day.date,
            weekday_name(day.date),
            day.event_count()
        ));
        for slot in day.slots.iter().filter(|slot| !slot.events.is_empty()) {
            for event in &slot.events {
                output.push_str(&format!("\n  {} {}", slot.label, format_event(event)));
            }
        }
        for event in &day.unslotted {
            output.push_str(&format!("\n  ----- {}", format_event(event)));
        }
    }
    output
}

/// Format a custom event for display.
pub fn format_custom_event(event: &CustomEvent) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Date: {}",
        event.title,
        event.kind.as_str(),
        event.id,
        event.date
    );
    if !event.time.is_empty() {
        output.push_str(&format!("\n  Time: {}", event.time));
    }
    if !event.notes.is_empty() {
        output.push_str(&format!("\n  Notes: {}", event.notes));
    }
    if !event.created_by.is_empty() {
        output.push_str(&format!("\n  Created by: {}", event.created_by));
    }
    output
}

/// Format custom events for display.
pub fn format_custom_events(events: &[CustomEvent]) -> String {
    if events.is_empty() {
        return "No custom events found.".to_string();
    }
    let mut output = format!("CUSTOM EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_custom_event(event)));
        output.push('\n');
    }
    output
}
