//! File-backed key-value store.
//!
//! Each key is a file of the same name in the data directory:
//!
//! ```text
//! ~/.local/share/trip-admin/
//! ├── adminCategories      # JSON array of categories
//! ├── adminItineraries     # JSON array of itineraries
//! └── adminToken           # opaque session token
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// Stores each value as a text file under a data directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new store rooted at `data_dir`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file path backing `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_file_name(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(key))
    }

    /// Checks if a value exists on disk for `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).map(|p| p.exists()).unwrap_or(false)
    }
}

fn is_plain_file_name(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0'])
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::Io {
            path: self.data_dir.clone(),
            source: e,
        })?;

        fs::write(&path, value).map_err(|e| StoreError::Io { path, source: e })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }
}
