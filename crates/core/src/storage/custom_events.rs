use serde_json::Value;

use crate::calendar::CustomEvent;

use super::serialization::{
    custom_event_to_value, decode_custom_event, decode_custom_events, parse_stored_events,
    serialize_stored_events, DecodedEvents,
};
use super::{KeyValueStore, Result, StoreError};

/// Key under which the custom-event list is stored.
pub const CUSTOM_EVENTS_KEY: &str = "clinic_custom_events";

/// Custom-event persistence on top of a [`KeyValueStore`].
///
/// The whole list lives under [`CUSTOM_EVENTS_KEY`] and is rewritten on every change.
/// Rewrites carry stored elements this crate cannot decode through unchanged.
#[derive(Debug, Clone)]
pub struct CustomEventRepository<S> {
    store: S,
}

impl<S: KeyValueStore> CustomEventRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads stored events, reporting how many stored elements were unreadable.
    pub fn load(&self) -> Result<DecodedEvents> {
        Ok(decode_custom_events(&self.load_raw()?))
    }

    /// Lists stored events in insertion order.
    pub fn list(&self) -> Result<Vec<CustomEvent>> {
        Ok(self.load()?.events)
    }

    /// Appends an event.
    pub fn insert(&self, event: CustomEvent) -> Result<()> {
        let mut values = self.load_raw()?;
        values.push(
            custom_event_to_value(&event).map_err(|e| StoreError::Serialization(e.to_string()))?,
        );
        self.save(&values)
    }

    /// Removes the first event with the given ID and returns it.
    pub fn delete(&self, id: &str) -> Result<CustomEvent> {
        let mut values = self.load_raw()?;
        let (position, removed) = values
            .iter()
            .enumerate()
            .find_map(|(position, value)| {
                decode_custom_event(value)
                    .filter(|event| event.id == id)
                    .map(|event| (position, event))
            })
            .ok_or_else(|| StoreError::NotFound {
                entity_type: "CustomEvent",
                id: id.to_string(),
            })?;
        values.remove(position);
        self.save(&values)?;
        Ok(removed)
    }

    /// Removes every stored event.
    pub fn clear(&self) -> Result<()> {
        self.store.delete(CUSTOM_EVENTS_KEY)
    }

    fn load_raw(&self) -> Result<Vec<Value>> {
        match self.store.get(CUSTOM_EVENTS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => {
                parse_stored_events(&raw).map_err(|e| StoreError::InvalidData(e.to_string()))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn save(&self, values: &[Value]) -> Result<()> {
        let raw = serialize_stored_events(values)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(CUSTOM_EVENTS_KEY, &raw)
    }
}
