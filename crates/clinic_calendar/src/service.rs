//! Calendar service: owns the source collections and serves the presentation views.
//!
//! The date index is derived state. It is built lazily on first use and discarded
//! whenever a source collection or the custom-event list changes.

use std::cell::OnceCell;

use chrono::{DateTime, NaiveDate, Utc};
use clinic_calendar_core::calendar::{
    day_badge, filter_events, highlight, month_grid, month_summary, month_total,
    normalize_sources, week_dates, week_grid, BookingRecord, CalendarEvent, CalendarSources,
    CellHighlight, CustomEvent, DateIndex, DayBadge, EventFilter, HolidayTable, LeaveRecord,
    MonthCursor, MonthGrid, MonthSummary, NewCustomEvent, QueueRecord, SlotWindow, WeekGrid,
};
use clinic_calendar_core::print::{build_print_projection, Legend, PrintDocument, PrintSource};
use clinic_calendar_core::storage::{CustomEventRepository, KeyValueStore};

use crate::error::Result;
use crate::sources::SourceSet;

/// Presentation-layer entry point over every calendar source.
pub struct CalendarService<S> {
    sources: SourceSet,
    holidays: HolidayTable,
    repository: CustomEventRepository<S>,
    custom_events: Vec<CustomEvent>,
    window: SlotWindow,
    index: OnceCell<DateIndex>,
}

impl<S: KeyValueStore> CalendarService<S> {
    /// Creates a service, loading the stored custom events.
    ///
    /// Stored elements that cannot be decoded are skipped with a warning.
    pub fn new(sources: SourceSet, holidays: HolidayTable, store: S) -> Result<Self> {
        let repository = CustomEventRepository::new(store);
        let decoded = repository.load()?;
        if decoded.skipped > 0 {
            tracing::warn!(skipped = decoded.skipped, "Skipped unreadable custom events");
        }

        Ok(Self {
            sources,
            holidays,
            repository,
            custom_events: decoded.events,
            window: SlotWindow::default(),
            index: OnceCell::new(),
        })
    }

    /// Uses a different time-slot window for the week view.
    pub fn with_slot_window(mut self, window: SlotWindow) -> Self {
        self.window = window;
        self
    }

    pub fn slot_window(&self) -> &SlotWindow {
        &self.window
    }

    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    pub fn set_bookings(&mut self, bookings: Vec<BookingRecord>) {
        self.sources.bookings = bookings;
        self.invalidate();
    }

    pub fn set_queue(&mut self, queue: Vec<QueueRecord>) {
        self.sources.queue = queue;
        self.invalidate();
    }

    pub fn set_leaves(&mut self, leaves: Vec<LeaveRecord>) {
        self.sources.leaves = leaves;
        self.invalidate();
    }

    pub fn set_holidays(&mut self, holidays: HolidayTable) {
        self.holidays = holidays;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.index.take();
    }

    /// Returns the date index, rebuilding it if any input changed.
    pub fn index(&self) -> &DateIndex {
        self.index.get_or_init(|| {
            let normalized = normalize_sources(&CalendarSources {
                bookings: &self.sources.bookings,
                queue: &self.sources.queue,
                leaves: &self.sources.leaves,
                holidays: &self.holidays,
                custom: &self.custom_events,
            });
            let dropped = normalized.dropped;
            let index = DateIndex::build(normalized.events);
            tracing::debug!(
                events = index.total_events(),
                dates = index.dates().count(),
                dropped,
                "Rebuilt date index"
            );
            index
        })
    }

    pub fn month_grid(&self, cursor: MonthCursor) -> MonthGrid {
        month_grid(self.index(), cursor)
    }

    pub fn week_dates(&self, reference: NaiveDate) -> [NaiveDate; 7] {
        week_dates(reference)
    }

    pub fn week_grid(&self, reference: NaiveDate) -> WeekGrid {
        week_grid(self.index(), reference, &self.window)
    }

    pub fn events_for_date(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.index().events_for_date(date)
    }

    /// Events on a date that pass the filter, in display order.
    pub fn filtered_events_for_date(
        &self,
        date: NaiveDate,
        filter: &EventFilter,
    ) -> Vec<CalendarEvent> {
        filter_events(self.events_for_date(date).to_vec(), filter)
    }

    pub fn day_badge(&self, date: NaiveDate) -> DayBadge {
        day_badge(self.events_for_date(date))
    }

    pub fn highlight(&self, date: NaiveDate, today: NaiveDate) -> CellHighlight<'_> {
        highlight(date, today, &self.holidays)
    }

    pub fn month_total(&self, cursor: MonthCursor) -> usize {
        month_total(&self.month_grid(cursor))
    }

    pub fn month_summary(&self, cursor: MonthCursor) -> MonthSummary {
        month_summary(&self.month_grid(cursor))
    }

    /// Print projection of a whole month.
    pub fn print_month(&self, cursor: MonthCursor, legend: &Legend) -> PrintDocument {
        let grid = self.month_grid(cursor);
        build_print_projection(PrintSource::Month(&grid), legend)
    }

    /// Print projection of an explicit event list.
    pub fn print_events(
        &self,
        title: &str,
        events: &[CalendarEvent],
        legend: &Legend,
    ) -> PrintDocument {
        build_print_projection(PrintSource::Events { title, events }, legend)
    }

    pub fn custom_events(&self) -> &[CustomEvent] {
        &self.custom_events
    }

    /// Validates, stores and indexes a new custom event.
    pub fn add_custom_event(
        &mut self,
        request: NewCustomEvent,
        now: DateTime<Utc>,
    ) -> Result<CustomEvent> {
        let event = request.into_event(now)?;
        self.repository.insert(event.clone())?;
        tracing::info!(id = %event.id, date = %event.date, "Added custom event");

        self.custom_events.push(event.clone());
        self.invalidate();
        Ok(event)
    }

    /// Deletes a stored custom event by ID.
    pub fn delete_custom_event(&mut self, id: &str) -> Result<CustomEvent> {
        let removed = self.repository.delete(id)?;
        tracing::info!(id, "Deleted custom event");

        if let Some(position) = self.custom_events.iter().position(|event| event.id == id) {
            self.custom_events.remove(position);
        }
        self.invalidate();
        Ok(removed)
    }
}
