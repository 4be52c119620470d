//! Key-value store adapters.
//!
//! All persisted state goes through a [`KeyValueStore`]: string keys mapped
//! to textual values. A missing key is a normal outcome and reads as
//! `Ok(None)`.
//!
//! # Backends
//!
//! - [`FileStore`]: one file per key in a data directory
//! - [`MemoryStore`]: in-process map, used by tests and throwaway sessions
//! - [`DetachedStore`]: no backend at all; reads are absent, writes vanish

mod detached;
mod file;
mod key;
mod memory;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use detached::DetachedStore;
pub use file::FileStore;
pub use key::StoreKey;
pub use memory::MemoryStore;

/// Synchronous string-keyed storage for serialized collections.
pub trait KeyValueStore {
    /// Whether a persistent backend exists.
    ///
    /// When this is false, callers skip writes and change notifications.
    fn is_available(&self) -> bool {
        true
    }

    /// Reads the value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
