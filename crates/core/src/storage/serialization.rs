//! Pure functions for encoding custom events to and from their stored JSON form.
//!
//! Custom events are stored as one JSON array. Decoding is lenient per element: a
//! malformed element is skipped and counted instead of failing the whole list.
//! Writers work on the raw elements so that skipped ones survive a rewrite.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::calendar::CustomEvent;

/// Errors that can occur during custom-event serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// The stored value is not a JSON array.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Custom events decoded from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedEvents {
    pub events: Vec<CustomEvent>,
    /// Number of stored elements that could not be decoded.
    pub skipped: usize,
}

/// Serializes custom events to a JSON array string.
pub fn serialize_custom_events(events: &[CustomEvent]) -> Result<String> {
    serde_json::to_string(events).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Encodes one custom event as a stored array element.
pub fn custom_event_to_value(event: &CustomEvent) -> Result<Value> {
    serde_json::to_value(event).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Parses the stored array without decoding its elements.
pub fn parse_stored_events(raw: &str) -> Result<Vec<Value>> {
    serde_json::from_str(raw).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes raw stored elements back to a JSON array string.
pub fn serialize_stored_events(values: &[Value]) -> Result<String> {
    serde_json::to_string(values).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Decodes one stored element, or `None` when it is not a readable custom event.
pub fn decode_custom_event(value: &Value) -> Option<CustomEvent> {
    CustomEvent::deserialize(value).ok()
}

/// Decodes stored elements, counting the ones that could not be read.
pub fn decode_custom_events(values: &[Value]) -> DecodedEvents {
    let events: Vec<CustomEvent> = values.iter().filter_map(decode_custom_event).collect();
    DecodedEvents {
        skipped: values.len() - events.len(),
        events,
    }
}

/// Deserializes a JSON array of custom events, skipping malformed elements.
pub fn deserialize_custom_events(raw: &str) -> Result<DecodedEvents> {
    Ok(decode_custom_events(&parse_stored_events(raw)?))
}
