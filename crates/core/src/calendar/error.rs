use thiserror::Error;

/// Errors that can occur when constructing grid coordinates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid month index {0} (expected 0-11)")]
    InvalidMonth(u32),
    #[error("Year {0} is out of the supported calendar range")]
    InvalidYear(i32),
    #[error("Invalid slot window: {0}")]
    InvalidSlotWindow(String),
}

/// Errors that can occur when validating a custom event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Invalid event time: {0}")]
    InvalidTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        assert_eq!(
            GridError::InvalidMonth(12).to_string(),
            "Invalid month index 12 (expected 0-11)"
        );
    }

    #[test]
    fn test_event_error_display() {
        assert_eq!(
            EventError::EmptyTitle.to_string(),
            "Event title cannot be empty"
        );
        assert_eq!(
            EventError::InvalidTime("25:00".to_string()).to_string(),
            "Invalid event time: 25:00"
        );
    }
}
