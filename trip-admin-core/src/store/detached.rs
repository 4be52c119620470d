//! Store used when no persistent backend exists.

use super::{KeyValueStore, StoreError};

/// A store with nothing behind it.
///
/// Every key reads as absent and writes are dropped. Lets the same calling
/// code run where storage is unavailable, such as non-interactive rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedStore;

impl KeyValueStore for DetachedStore {
    fn is_available(&self) -> bool {
        false
    }

    fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_store_drops_writes() {
        let store = DetachedStore;
        assert!(!store.is_available());
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
        store.remove("k").unwrap();
    }
}
