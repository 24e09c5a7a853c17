use std::{env, path::PathBuf};

use chrono::NaiveTime;
use clinic_calendar_core::calendar::{parse_clock_time, SlotWindow};

const DEFAULT_DATA_DIR: &str = ".clinic-calendar";
const DEFAULT_PRINT_TITLE: &str = "診所行事曆";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the source dumps and the custom-event store (default: ".clinic-calendar")
    pub data_dir: PathBuf,
    /// Start of the first week-view slot (default: 09:00)
    pub slot_start: NaiveTime,
    /// Start of the last week-view slot (default: 19:30)
    pub slot_end: NaiveTime,
    /// Title used for printed documents (default: "診所行事曆")
    pub print_title: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLINIC_CALENDAR_DATA_DIR` - Data directory (default: ".clinic-calendar")
    /// - `CLINIC_CALENDAR_SLOT_START` - First slot, `HH:MM` (default: 09:00)
    /// - `CLINIC_CALENDAR_SLOT_END` - Last slot, `HH:MM` (default: 19:30)
    /// - `CLINIC_CALENDAR_PRINT_TITLE` - Print title (default: "診所行事曆")
    ///
    /// Unparseable values fall back to their defaults, as does a slot pair whose end
    /// precedes its start.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SlotWindow::default();
        let slot_start = lookup("CLINIC_CALENDAR_SLOT_START")
            .and_then(|v| parse_clock_time(&v))
            .unwrap_or(defaults.first());
        let slot_end = lookup("CLINIC_CALENDAR_SLOT_END")
            .and_then(|v| parse_clock_time(&v))
            .unwrap_or(defaults.last());
        let (slot_start, slot_end) = match SlotWindow::half_hourly(slot_start, slot_end) {
            Ok(window) => (window.first(), window.last()),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring configured slot window, using default");
                (defaults.first(), defaults.last())
            }
        };

        Self {
            data_dir: lookup("CLINIC_CALENDAR_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            slot_start,
            slot_end,
            print_title: lookup("CLINIC_CALENDAR_PRINT_TITLE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PRINT_TITLE.to_string()),
        }
    }

    /// Overrides the data directory, e.g. from a CLI flag.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Half-hour slot window for the week view, or the default window when the
    /// configured pair is inverted.
    pub fn slot_window(&self) -> SlotWindow {
        SlotWindow::half_hourly(self.slot_start, self.slot_end).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring configured slot window, using default");
            SlotWindow::default()
        })
    }

    /// Path of the file backing the custom-event store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn make_time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.data_dir, PathBuf::from(".clinic-calendar"));
        assert_eq!(config.slot_start, make_time(9, 0));
        assert_eq!(config.slot_end, make_time(19, 30));
        assert_eq!(config.print_title, "診所行事曆");
    }

    #[test]
    fn test_values_from_lookup() {
        let config = config_from(&[
            ("CLINIC_CALENDAR_DATA_DIR", "/tmp/clinic"),
            ("CLINIC_CALENDAR_SLOT_START", "8:30"),
            ("CLINIC_CALENDAR_SLOT_END", "12:00"),
            ("CLINIC_CALENDAR_PRINT_TITLE", "March"),
        ]);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/clinic"));
        assert_eq!(config.slot_start, make_time(8, 30));
        assert_eq!(config.slot_end, make_time(12, 0));
        assert_eq!(config.print_title, "March");
        assert_eq!(config.store_path(), PathBuf::from("/tmp/clinic/store.json"));
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("CLINIC_CALENDAR_SLOT_START", "morning"),
            ("CLINIC_CALENDAR_PRINT_TITLE", "   "),
        ]);

        assert_eq!(config.slot_start, make_time(9, 0));
        assert_eq!(config.print_title, "診所行事曆");
    }

    #[test]
    fn test_slot_window_default_has_22_slots() {
        let window = Config::default().slot_window();
        assert_eq!(window.slots().len(), 22);
    }

    #[test]
    fn test_inverted_slot_window_falls_back_to_default() {
        let config = config_from(&[
            ("CLINIC_CALENDAR_SLOT_START", "18:00"),
            ("CLINIC_CALENDAR_SLOT_END", "09:00"),
        ]);

        assert_eq!(config.slot_start, make_time(9, 0));
        assert_eq!(config.slot_end, make_time(19, 30));
        assert_eq!(config.slot_window(), SlotWindow::default());
    }

    #[test]
    fn test_inverted_fields_set_directly_fall_back_to_default() {
        let config = Config {
            slot_start: make_time(18, 0),
            slot_end: make_time(9, 0),
            ..Config::default()
        };

        assert_eq!(config.slot_window().slots().len(), 22);
    }

    #[test]
    fn test_with_data_dir_overrides() {
        let config = Config::default().with_data_dir("elsewhere");
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
    }
}
