//! Month and week grids derived from the [`DateIndex`].

use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::error::GridError;
use super::holidays::HolidayTable;
use super::index::DateIndex;
use super::types::CalendarEvent;

/// Returns true for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month. `month` is zero-based (0 = January).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// A displayed month. Months are zero-based (0 = January) to match the views.
///
/// Serialized as `{"year", "month"}`; deserialization goes through [`MonthCursor::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "MonthCursorRepr", into = "MonthCursorRepr")]
pub struct MonthCursor {
    first: NaiveDate,
}

#[derive(Clone, Serialize, Deserialize)]
struct MonthCursorRepr {
    year: i32,
    month: u32,
}

impl TryFrom<MonthCursorRepr> for MonthCursor {
    type Error = GridError;

    fn try_from(repr: MonthCursorRepr) -> Result<Self, Self::Error> {
        Self::new(repr.year, repr.month)
    }
}

impl From<MonthCursor> for MonthCursorRepr {
    fn from(cursor: MonthCursor) -> Self {
        Self {
            year: cursor.year(),
            month: cursor.month(),
        }
    }
}

impl MonthCursor {
    /// Creates a cursor for a zero-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, GridError> {
        if month > 11 {
            return Err(GridError::InvalidMonth(month));
        }
        let first =
            NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(GridError::InvalidYear(year))?;
        Ok(Self { first })
    }

    /// Returns the month containing a date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days_in_month()) - 1)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Weekday offset of day 1 (0 = Sunday), i.e. the number of leading blank cells.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The previous month, rolling over to December of the previous year.
    ///
    /// Stays put at the lower bound of the supported calendar range.
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// The next month, rolling over to January of the next year.
    ///
    /// Stays put at the upper bound of the supported calendar range.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// Display title, e.g. `2026年3月`.
    pub fn label(&self) -> String {
        format!("{}年{}月", self.year(), self.month() + 1)
    }

    /// Returns true if the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() + 1)
    }
}

/// A day of the month with its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    /// Presentation flags for this cell.
    pub fn highlight<'a>(&self, today: NaiveDate, holidays: &'a HolidayTable) -> CellHighlight<'a> {
        highlight(self.date, today, holidays)
    }
}

/// One position in the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MonthCell {
    Blank,
    Day(DayCell),
}

impl MonthCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            MonthCell::Day(cell) => Some(cell),
            MonthCell::Blank => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, MonthCell::Blank)
    }
}

/// A week-padded, row-major grid of one month. Its length is a multiple of 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    /// Iterates over weeks (rows of 7 cells, Sunday first).
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }

    /// Iterates over the non-blank cells in day order.
    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(MonthCell::as_day)
    }
}

/// Builds the grid for a month: leading blanks for day 1's weekday, one cell per day,
/// trailing blanks up to the next multiple of 7.
pub fn month_grid(index: &DateIndex, cursor: MonthCursor) -> MonthGrid {
    let leading = cursor.leading_blanks() as usize;
    let days = cursor.days_in_month();
    let len = (leading + days as usize).div_ceil(7) * 7;

    let mut cells = Vec::with_capacity(len);
    cells.extend((0..leading).map(|_| MonthCell::Blank));

    let mut date = cursor.first_day();
    for day in 1..=days {
        cells.push(MonthCell::Day(DayCell {
            day,
            date,
            events: index.events_for_date(date).to_vec(),
        }));
        date += Duration::days(1);
    }

    cells.resize(len, MonthCell::Blank);

    MonthGrid { cursor, cells }
}

/// Returns the Sunday on or before the given date.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(i64::from(reference.weekday().num_days_from_sunday()))
}

/// Returns the 7 dates of the Sunday-first week containing the reference date.
pub fn week_dates(reference: NaiveDate) -> [NaiveDate; 7] {
    let sunday = week_start(reference);
    std::array::from_fn(|offset| sunday + Duration::days(offset as i64))
}

/// Moves the reference date by whole weeks (7 days per step).
pub fn step_week(reference: NaiveDate, weeks: i64) -> NaiveDate {
    reference + Duration::days(7 * weeks)
}

/// Fixed sequence of time slots shown in the week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlotWindowRepr", into = "SlotWindowRepr")]
pub struct SlotWindow {
    first: NaiveTime,
    last: NaiveTime,
    step_minutes: u32,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotWindowRepr {
    first: NaiveTime,
    last: NaiveTime,
    step_minutes: u32,
}

impl TryFrom<SlotWindowRepr> for SlotWindow {
    type Error = GridError;

    fn try_from(repr: SlotWindowRepr) -> Result<Self, Self::Error> {
        Self::new(repr.first, repr.last, repr.step_minutes)
    }
}

impl From<SlotWindow> for SlotWindowRepr {
    fn from(window: SlotWindow) -> Self {
        Self {
            first: window.first,
            last: window.last,
            step_minutes: window.step_minutes,
        }
    }
}

impl SlotWindow {
    /// Half-hour slots from `first` up to and including `last`.
    pub fn half_hourly(first: NaiveTime, last: NaiveTime) -> Result<Self, GridError> {
        Self::new(first, last, 30)
    }

    /// Slots of `step_minutes` from `first` up to and including `last`.
    pub fn new(first: NaiveTime, last: NaiveTime, step_minutes: u32) -> Result<Self, GridError> {
        if step_minutes == 0 || 24 * 60 % step_minutes != 0 {
            return Err(GridError::InvalidSlotWindow(format!(
                "step of {step_minutes} minutes does not divide a day"
            )));
        }
        if last < first {
            return Err(GridError::InvalidSlotWindow(format!(
                "last slot {} is before first slot {}",
                last.format("%H:%M"),
                first.format("%H:%M")
            )));
        }
        Ok(Self {
            first,
            last,
            step_minutes,
        })
    }

    pub fn first(&self) -> NaiveTime {
        self.first
    }

    pub fn last(&self) -> NaiveTime {
        self.last
    }

    /// Start times of every slot in the window.
    pub fn slots(&self) -> Vec<NaiveTime> {
        let count = self.slot_count();
        (0..count)
            .map(|i| self.first + Duration::minutes(i64::from(i * self.step_minutes)))
            .collect()
    }

    fn slot_count(&self) -> u32 {
        (minutes_of_day(self.last) - minutes_of_day(self.first)) / self.step_minutes + 1
    }

    /// The slot a time falls into: the latest slot starting at or before it.
    pub fn slot_for(&self, time: NaiveTime) -> Option<NaiveTime> {
        let minutes = minutes_of_day(time);
        let first = minutes_of_day(self.first);
        if minutes < first {
            return None;
        }
        let index = (minutes - first) / self.step_minutes;
        (index < self.slot_count())
            .then(|| self.first + Duration::minutes(i64::from(index * self.step_minutes)))
    }
}

impl Default for SlotWindow {
    /// Half-hour slots from 09:00 to 19:30.
    fn default() -> Self {
        Self {
            first: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            last: NaiveTime::from_hms_opt(19, 30, 0).unwrap_or_default(),
            step_minutes: 30,
        }
    }
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// One time slot of one day in the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    /// `HH:MM` label of the slot start.
    pub label: String,
    pub events: Vec<CalendarEvent>,
}

/// One column of the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    /// Events without a clock time or outside the slot window.
    pub unslotted: Vec<CalendarEvent>,
}

impl WeekDay {
    /// Total events on this day, slotted or not.
    pub fn event_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.events.len()).sum::<usize>() + self.unslotted.len()
    }
}

/// Seven consecutive days starting on a Sunday, bucketed into time slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub days: Vec<WeekDay>,
}

impl WeekGrid {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|day| day.date).collect()
    }
}

/// Builds the week view for the Sunday-first week containing the reference date.
pub fn week_grid(index: &DateIndex, reference: NaiveDate, window: &SlotWindow) -> WeekGrid {
    let slot_starts = window.slots();
    let days = week_dates(reference)
        .into_iter()
        .map(|date| {
            let mut slots: Vec<TimeSlot> = slot_starts
                .iter()
                .map(|start| TimeSlot {
                    start: *start,
                    label: start.format("%H:%M").to_string(),
                    events: Vec::new(),
                })
                .collect();
            let mut unslotted = Vec::new();

            for event in index.events_for_date(date) {
                let position = event
                    .start_time()
                    .and_then(|time| window.slot_for(time))
                    .and_then(|start| slot_starts.iter().position(|slot| *slot == start));
                match position {
                    Some(position) => slots[position].events.push(event.clone()),
                    None => unslotted.push(event.clone()),
                }
            }

            WeekDay {
                date,
                slots,
                unslotted,
            }
        })
        .collect();

    WeekGrid {
        start: week_start(reference),
        days,
    }
}

/// Presentation flags for a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellHighlight<'a> {
    pub is_today: bool,
    pub holiday: Option<&'a str>,
}

impl CellHighlight<'_> {
    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }
}

/// Derives the "today" and "holiday" flags for a date.
pub fn highlight(date: NaiveDate, today: NaiveDate, holidays: &HolidayTable) -> CellHighlight<'_> {
    CellHighlight {
        is_today: date == today,
        holiday: holidays.name(date),
    }
}
