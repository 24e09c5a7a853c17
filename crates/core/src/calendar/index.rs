//! Date index: every source stream merged under its calendar date.
//!
//! The index is a pure function of its inputs. It is never patched; callers rebuild
//! it whenever any source changes.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::expand::expand_leave;
use super::holidays::HolidayTable;
use super::normalize::{normalize_booking, normalize_custom, normalize_queue};
use super::records::{BookingRecord, CustomEvent, LeaveRecord, QueueRecord};
use super::types::CalendarEvent;

/// Borrowed view over the five source collections.
#[derive(Debug, Clone, Copy)]
pub struct CalendarSources<'a> {
    pub bookings: &'a [BookingRecord],
    pub queue: &'a [QueueRecord],
    pub leaves: &'a [LeaveRecord],
    pub holidays: &'a HolidayTable,
    pub custom: &'a [CustomEvent],
}

/// Canonical events from all sources in merge order, plus how many records were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedEvents {
    pub events: Vec<CalendarEvent>,
    pub dropped: usize,
}

/// Normalizes every source record, expanding leave spans, in source-merge order.
pub fn normalize_sources(sources: &CalendarSources<'_>) -> NormalizedEvents {
    let mut events = Vec::new();
    let mut dropped = 0;

    for (position, record) in sources.bookings.iter().enumerate() {
        match normalize_booking(record, position) {
            Some(event) => events.push(event),
            None => dropped += 1,
        }
    }

    for (position, record) in sources.queue.iter().enumerate() {
        match normalize_queue(record, position) {
            Some(event) => events.push(event),
            None => dropped += 1,
        }
    }

    for (position, record) in sources.leaves.iter().enumerate() {
        let expanded = expand_leave(record, position);
        if expanded.is_empty() {
            dropped += 1;
        }
        events.extend(expanded);
    }

    events.extend(sources.holidays.events());
    events.extend(sources.custom.iter().map(normalize_custom));

    NormalizedEvents { events, dropped }
}

/// Orders events by time of day, untimed first, then by source-merge order.
///
/// Clock times compare chronologically; free-text times sort after all clock times.
pub fn compare_events(a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    time_rank(a)
        .cmp(&time_rank(b))
        .then_with(|| a.start_time().cmp(&b.start_time()))
        .then_with(|| a.time.cmp(&b.time))
        .then_with(|| a.event_type.merge_order().cmp(&b.event_type.merge_order()))
}

fn time_rank(event: &CalendarEvent) -> u8 {
    if event.is_untimed() {
        0
    } else if event.start_time().is_some() {
        1
    } else {
        2
    }
}

/// Mapping from calendar date to that day's ordered events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    days: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl DateIndex {
    /// Builds an index by appending every event under its date, then ordering each day.
    ///
    /// The per-day sort is stable, so events that compare equal keep their input order.
    pub fn build(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();

        for event in events {
            days.entry(event.date).or_default().push(event);
        }

        for day_events in days.values_mut() {
            day_events.sort_by(compare_events);
        }

        Self { days }
    }

    /// Returns the events on a date, in display order.
    pub fn events_for_date(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns events on every date in the inclusive range, in date then display order.
    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&CalendarEvent> {
        if end < start {
            return Vec::new();
        }
        self.days
            .range(start..=end)
            .flat_map(|(_, events)| events.iter())
            .collect()
    }

    /// Iterates over dates that have at least one event.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Total number of events across all dates.
    pub fn total_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Normalizes all sources and builds the index in one step.
pub fn build_date_index(sources: &CalendarSources<'_>) -> DateIndex {
    DateIndex::build(normalize_sources(sources).events)
}
