//! Output formatting functions.

pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value as JSON for output.
///
/// Pretty output of structured values falls back to indented JSON; views with a
/// dedicated layout use the functions in [`pretty`].
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}
