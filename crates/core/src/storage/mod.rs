mod custom_events;
mod error;
mod serialization;
mod traits;

pub use custom_events::{CustomEventRepository, CUSTOM_EVENTS_KEY};
pub use error::{Result, StoreError};
pub use serialization::{
    custom_event_to_value, decode_custom_event, decode_custom_events, deserialize_custom_events,
    parse_stored_events, serialize_custom_events, serialize_stored_events, DecodedEvents,
    SerializationError,
};
pub use traits::KeyValueStore;
