//! clinic_calendar - service layer and CLI around `clinic_calendar_core`.
//!
//! The core crate is pure. Everything that reads files, persists custom events or
//! logs lives here.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod service;
pub mod sources;
pub mod storage;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use service::CalendarService;
pub use sources::SourceSet;
