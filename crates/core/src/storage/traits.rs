use super::Result;

/// String key-value persistence port.
///
/// Custom events are the only calendar data this crate writes; they reach storage
/// exclusively through this trait so the engine never touches a host-global store.
pub trait KeyValueStore: Send + Sync {
    /// Gets a value by key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Sets a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
