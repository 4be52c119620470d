//! Admin session token presence check.
//!
//! The token is opaque: it is stored and cleared, and its presence gates the
//! console, but its content is never inspected.

use crate::storage::{Storage, StorageError};
use crate::store::StoreKey;

pub struct Session<'a> {
    storage: &'a Storage,
}

impl<'a> Session<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// True when a non-empty token is stored.
    pub fn token_present(&self) -> Result<bool, StorageError> {
        Ok(self
            .storage
            .read_raw(StoreKey::AdminToken)?
            .is_some_and(|token| !token.trim().is_empty()))
    }

    pub fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.write_raw(StoreKey::AdminToken, token)
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove_raw(StoreKey::AdminToken)
    }
}
