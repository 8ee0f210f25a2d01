/// Local key-value storage the catalog persists into.
///
/// Values are opaque strings; the catalog writes a JSON snapshot under a single key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a key that does not exist is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded: {required} bytes needed, {quota} allowed")]
    QuotaExceeded {
        required: usize,
        quota: usize,
    },

    #[error("Storage contents are corrupt: {0}")]
    Corrupt(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
