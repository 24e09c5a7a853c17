//! Loading of the read-only source dumps from a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use clinic_calendar_core::calendar::{BookingRecord, LeaveRecord, QueueRecord};
use serde::de::DeserializeOwned;

use crate::error::{Result, ServiceError};

pub const BOOKINGS_FILE: &str = "bookings.json";
pub const QUEUE_FILE: &str = "queue.json";
pub const LEAVES_FILE: &str = "leaves.json";

/// The three externally supplied record collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSet {
    pub bookings: Vec<BookingRecord>,
    pub queue: Vec<QueueRecord>,
    pub leaves: Vec<LeaveRecord>,
    /// Records dropped at load because their shape could not be read.
    pub skipped: usize,
}

impl SourceSet {
    /// Loads `bookings.json`, `queue.json` and `leaves.json` from a directory.
    ///
    /// A missing file is an empty collection. A file that is not a JSON array is an
    /// error; individual records that fail to decode are skipped and counted.
    pub fn load(dir: &Path) -> Result<Self> {
        let (bookings, skipped_bookings) = read_records(&dir.join(BOOKINGS_FILE))?;
        let (queue, skipped_queue) = read_records(&dir.join(QUEUE_FILE))?;
        let (leaves, skipped_leaves) = read_records(&dir.join(LEAVES_FILE))?;
        let sources = Self {
            bookings,
            queue,
            leaves,
            skipped: skipped_bookings + skipped_queue + skipped_leaves,
        };
        tracing::debug!(
            bookings = sources.bookings.len(),
            queue = sources.queue.len(),
            leaves = sources.leaves.len(),
            skipped = sources.skipped,
            dir = %dir.display(),
            "Loaded source records"
        );
        Ok(sources)
    }

    pub fn record_count(&self) -> usize {
        self.bookings.len() + self.queue.len() + self.leaves.len()
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, usize)> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Source file missing, using empty stream");
            return Ok((Vec::new(), 0));
        }
        Err(source) => {
            return Err(ServiceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if raw.trim().is_empty() {
        return Ok((Vec::new(), 0));
    }
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|source| ServiceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(path = %path.display(), position, error = %e, "Unreadable record");
                None
            }
        })
        .collect();

    let skipped = total - records.len();
    if skipped > 0 {
        tracing::warn!(path = %path.display(), skipped, "Skipped unreadable source records");
    }
    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_loads_empty_sources() {
        let dir = tempfile::tempdir().unwrap();
        let sources = SourceSet::load(dir.path()).unwrap();

        assert_eq!(sources, SourceSet::default());
        assert_eq!(sources.record_count(), 0);
    }

    #[test]
    fn test_loads_camel_case_records() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BOOKINGS_FILE),
            r#"[{"id":"b1","date":"2026-03-10","time":"10:00","patientName":"王小明","doctor":"陳醫師"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(LEAVES_FILE),
            r#"[{"startDate":"2026-03-09","endDate":"2026-03-11","staffName":"林護理師","type":"特休"}]"#,
        )
        .unwrap();

        let sources = SourceSet::load(dir.path()).unwrap();

        assert_eq!(sources.bookings.len(), 1);
        assert_eq!(sources.bookings[0].patient_name.as_deref(), Some("王小明"));
        assert!(sources.queue.is_empty());
        assert_eq!(sources.leaves[0].leave_type.as_deref(), Some("特休"));
    }

    #[test]
    fn test_mixed_shape_records_degrade_per_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(BOOKINGS_FILE),
            r#"[
                {"id":1,"date":"2026-03-10","time":"09:00","patientName":"王小明"},
                {"id":"b2","date":"2026-03-10","time":"10:00","patientName":"林美華"},
                {"id":"b3","date":"2026-03-11","patientName":["not","a","name"]},
                "stray"
            ]"#,
        )
        .unwrap();

        let sources = SourceSet::load(dir.path()).unwrap();

        let ids: Vec<_> = sources.bookings.iter().map(|b| b.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("1"), Some("b2")]);
        assert_eq!(sources.skipped, 2);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(QUEUE_FILE), "{not json").unwrap();

        match SourceSet::load(dir.path()) {
            Err(ServiceError::Parse { path, .. }) => assert!(path.ends_with(QUEUE_FILE)),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
