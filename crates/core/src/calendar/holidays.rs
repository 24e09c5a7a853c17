use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::normalize::normalize_holiday;
use super::types::CalendarEvent;

/// Taiwan public holidays and make-up days off, pre-expanded per date.
const TAIWAN_PUBLIC_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    (2025, 1, 1, "元旦"),
    (2025, 1, 27, "春節調整放假"),
    (2025, 1, 28, "除夕"),
    (2025, 1, 29, "春節"),
    (2025, 1, 30, "春節"),
    (2025, 1, 31, "春節"),
    (2025, 2, 28, "和平紀念日"),
    (2025, 4, 3, "兒童節補假"),
    (2025, 4, 4, "兒童節及民族掃墓節"),
    (2025, 5, 1, "勞動節"),
    (2025, 5, 30, "端午節補假"),
    (2025, 5, 31, "端午節"),
    (2025, 9, 28, "教師節"),
    (2025, 9, 29, "教師節補假"),
    (2025, 10, 6, "中秋節"),
    (2025, 10, 10, "國慶日"),
    (2025, 10, 24, "臺灣光復暨金門古寧頭大捷紀念日"),
    (2025, 12, 25, "行憲紀念日"),
    (2026, 1, 1, "元旦"),
    (2026, 2, 16, "除夕"),
    (2026, 2, 17, "春節"),
    (2026, 2, 18, "春節"),
    (2026, 2, 19, "春節"),
    (2026, 2, 20, "春節補假"),
    (2026, 2, 27, "和平紀念日補假"),
    (2026, 2, 28, "和平紀念日"),
    (2026, 4, 3, "兒童節補假"),
    (2026, 4, 4, "兒童節"),
    (2026, 4, 5, "民族掃墓節"),
    (2026, 4, 6, "民族掃墓節補假"),
    (2026, 5, 1, "勞動節"),
    (2026, 6, 19, "端午節"),
    (2026, 9, 25, "中秋節"),
    (2026, 9, 28, "教師節"),
    (2026, 10, 9, "國慶日補假"),
    (2026, 10, 10, "國慶日"),
    (2026, 10, 25, "臺灣光復暨金門古寧頭大捷紀念日"),
    (2026, 10, 26, "光復節補假"),
    (2026, 12, 25, "行憲紀念日"),
];

/// Immutable date → holiday name reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    entries: BTreeMap<NaiveDate, String>,
}

impl HolidayTable {
    /// Creates a table from `(date, name)` pairs. Later duplicates replace earlier ones.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(date, name)| (date, name.into()))
                .collect(),
        }
    }

    /// Creates the compiled-in table of Taiwan public holidays.
    pub fn builtin() -> Self {
        Self::new(TAIWAN_PUBLIC_HOLIDAYS.iter().filter_map(|&(y, m, d, name)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| (date, name))
        }))
    }

    /// Returns the holiday name for a date.
    pub fn name(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    /// Returns true if the date is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Iterates over entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.entries.iter().map(|(date, name)| (*date, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Projects the table into one untimed event per entry.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.iter()
            .map(|(date, name)| normalize_holiday(date, name))
            .collect()
    }
}
