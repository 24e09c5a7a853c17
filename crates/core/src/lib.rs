//! Functional core of the clinic calendar.
//!
//! Everything in this crate is a pure function over owned data: source records are
//! normalized into [`calendar::CalendarEvent`]s, merged into a [`calendar::DateIndex`],
//! projected into month and week grids, and finally into an escaped
//! [`print::PrintDocument`]. Persistence for custom events is reached only through the
//! [`storage::KeyValueStore`] port.

pub mod calendar;
pub mod print;
pub mod storage;
