use crate::models::error::CaptureError;

/// String key/value storage injected into host-side helpers such as the scan log.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String) -> Result<(), CaptureError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn clear(&self, key: &str) -> Result<(), CaptureError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), CaptureError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), CaptureError> {
        (**self).clear(key)
    }
}
