mod counters;
mod error;
mod expand;
mod grid;
mod holidays;
mod index;
mod normalize;
mod operations;
mod records;
mod types;

pub use counters::{day_badge, month_summary, month_total, DayBadge, MonthSummary, DOT_THRESHOLD};
pub use error::{EventError, GridError};
pub use expand::{expand_leave, expand_range};
pub use grid::{
    days_in_month, highlight, is_leap_year, month_grid, step_week, week_dates, week_grid,
    week_start, CellHighlight, DayCell, MonthCell, MonthCursor, MonthGrid, SlotWindow, TimeSlot,
    WeekDay, WeekGrid,
};
pub use holidays::HolidayTable;
pub use index::{
    build_date_index, compare_events, normalize_sources, CalendarSources, DateIndex,
    NormalizedEvents,
};
pub use normalize::{
    canonical_time, normalize_booking, normalize_custom, normalize_holiday, normalize_queue,
    normalize_time, parse_clock_time, parse_iso_date,
};
pub use operations::{filter_events, EventFilter};
pub use records::{
    BookingRecord, CustomEvent, CustomEventKind, LeaveRecord, NewCustomEvent, QueueRecord,
};
pub use types::{CalendarEvent, EventType};
