//! Service error types.

use std::path::PathBuf;

use clinic_calendar_core::calendar::{EventError, GridError};
use clinic_calendar_core::storage::StoreError;
use thiserror::Error;

/// Result type alias for the service layer.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while loading sources or serving calendar views.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid custom event: {0}")]
    InvalidEvent(#[from] EventError),

    #[error("Invalid calendar position: {0}")]
    Grid(#[from] GridError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
