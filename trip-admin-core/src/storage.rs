//! The storage handle shared by repositories.
//!
//! A [`Storage`] owns the key-value backend, the change bus and the id
//! generator. Construct one at startup and hand out repositories from it:
//!
//! ```
//! use trip_admin_core::{NewCategory, SeedPolicy, Storage};
//!
//! let storage = Storage::in_memory();
//! storage.initialize(SeedPolicy::IfAbsent).unwrap();
//! let created = storage.categories().add(NewCategory::new("Safari")).unwrap();
//! assert!(storage.categories().get(&created.id).unwrap().is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{self, UNKNOWN_CATEGORY_ID};
use crate::events::{ChangeBus, ChangeEvent, CollectionKind, Subscription};
use crate::ids::IdGenerator;
use crate::models::{Category, Itinerary};
use crate::query::CatalogQuery;
use crate::repository::{CategoryRepository, ItineraryRepository};
use crate::session::Session;
use crate::store::{DetachedStore, KeyValueStore, MemoryStore, StoreError, StoreKey};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Stored value for {key} is corrupt: {source}")]
    CorruptState {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for {key}: {source}")]
    Encode {
        key: StoreKey,
        #[source]
        source: serde_json::Error,
    },
}

/// How `initialize` treats collections that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Seed only missing collections and restore a missing sentinel category.
    #[default]
    IfAbsent,
    /// Overwrite both collections with the seed data.
    Always,
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::IfAbsent => write!(f, "if-absent"),
            SeedPolicy::Always => write!(f, "always"),
        }
    }
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "if-absent" | "if_absent" => Ok(SeedPolicy::IfAbsent),
            "always" | "reset" => Ok(SeedPolicy::Always),
            other => Err(format!(
                "unknown seed policy '{}', expected 'if-absent' or 'always'",
                other
            )),
        }
    }
}

/// What `initialize` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    pub categories_written: bool,
    pub itineraries_written: bool,
    pub sentinel_restored: bool,
}

/// Store handle threaded through every repository.
pub struct Storage {
    store: Box<dyn KeyValueStore>,
    bus: ChangeBus,
    ids: IdGenerator,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("available", &self.is_available())
            .field("bus", &self.bus)
            .finish()
    }
}

impl Storage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            bus: ChangeBus::new(),
            ids: IdGenerator::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// A handle with no persistent backend.
    pub fn detached() -> Self {
        Self::new(DetachedStore)
    }

    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    pub fn itineraries(&self) -> ItineraryRepository<'_> {
        ItineraryRepository::new(self)
    }

    pub fn catalog(&self) -> CatalogQuery<'_> {
        CatalogQuery::new(self)
    }

    pub fn session(&self) -> Session<'_> {
        Session::new(self)
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    pub fn subscribe(
        &self,
        kind: CollectionKind,
        listener: impl Fn(&ChangeEvent) + 'static,
    ) -> Subscription {
        self.bus.subscribe(kind, listener)
    }

    pub fn subscribe_all(&self, listener: impl Fn(&ChangeEvent) + 'static) -> Subscription {
        self.bus.subscribe_all(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    pub(crate) fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub(crate) fn read_raw(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        Ok(self.store.read(key.as_str())?)
    }

    pub(crate) fn write_raw(&self, key: StoreKey, value: &str) -> Result<(), StorageError> {
        Ok(self.store.write(key.as_str(), value)?)
    }

    pub(crate) fn remove_raw(&self, key: StoreKey) -> Result<(), StorageError> {
        Ok(self.store.remove(key.as_str())?)
    }

    /// Reads and decodes a collection. `Ok(None)` when the key is absent.
    pub(crate) fn load<T: DeserializeOwned>(
        &self,
        key: StoreKey,
    ) -> Result<Option<Vec<T>>, StorageError> {
        match self.read_raw(key)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| StorageError::CorruptState { key, source }),
            None => Ok(None),
        }
    }

    /// Encodes and writes a collection. Returns false when no backend is
    /// available and nothing was written.
    pub(crate) fn save<T: Serialize>(
        &self,
        key: StoreKey,
        items: &[T],
    ) -> Result<bool, StorageError> {
        if !self.is_available() {
            return Ok(false);
        }
        let text =
            serde_json::to_string(items).map_err(|source| StorageError::Encode { key, source })?;
        self.write_raw(key, &text)?;
        tracing::debug!(key = %key, items = items.len(), "persisted collection");
        Ok(true)
    }

    /// Seeds storage with the default catalog according to `policy`.
    pub fn initialize(&self, policy: SeedPolicy) -> Result<InitReport, StorageError> {
        let mut report = InitReport::default();
        if !self.is_available() {
            return Ok(report);
        }

        match policy {
            SeedPolicy::Always => {
                self.categories()
                    .replace_all(&defaults::default_categories())?;
                self.itineraries()
                    .replace_all(&defaults::default_itineraries())?;
                report.categories_written = true;
                report.itineraries_written = true;
            }
            SeedPolicy::IfAbsent => {
                match self.load::<Category>(StoreKey::Categories)? {
                    None => {
                        self.categories()
                            .replace_all(&defaults::default_categories())?;
                        report.categories_written = true;
                    }
                    Some(mut categories) => {
                        if !categories.iter().any(|c| c.id == UNKNOWN_CATEGORY_ID) {
                            categories.push(defaults::unknown_category());
                            self.categories().replace_all(&categories)?;
                            report.categories_written = true;
                            report.sentinel_restored = true;
                        }
                    }
                }
                if self.load::<Itinerary>(StoreKey::Itineraries)?.is_none() {
                    self.itineraries()
                        .replace_all(&defaults::default_itineraries())?;
                    report.itineraries_written = true;
                }
            }
        }

        tracing::debug!(policy = %policy, ?report, "storage initialized");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{default_categories, default_itineraries};
    use crate::models::{CategoryPatch, NewCategory};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_seed_policy_parse() {
        assert_eq!("if-absent".parse::<SeedPolicy>(), Ok(SeedPolicy::IfAbsent));
        assert_eq!("ALWAYS".parse::<SeedPolicy>(), Ok(SeedPolicy::Always));
        assert!("sometimes".parse::<SeedPolicy>().is_err());
        assert_eq!(SeedPolicy::default(), SeedPolicy::IfAbsent);
        assert_eq!(SeedPolicy::IfAbsent.to_string(), "if-absent");
    }

    #[test]
    fn test_initialize_empty_store_writes_both() {
        let storage = Storage::in_memory();
        let report = storage.initialize(SeedPolicy::IfAbsent).unwrap();

        assert!(report.categories_written);
        assert!(report.itineraries_written);
        assert!(!report.sentinel_restored);
        assert!(storage.read_raw(StoreKey::Categories).unwrap().is_some());
        assert!(storage.read_raw(StoreKey::Itineraries).unwrap().is_some());
        assert_eq!(storage.bus().emitted(), 2);
    }

    #[test]
    fn test_initialize_if_absent_keeps_edits() {
        let storage = Storage::in_memory();
        storage.initialize(SeedPolicy::IfAbsent).unwrap();
        let created = storage.categories().add(NewCategory::new("Safari")).unwrap();

        let report = storage.initialize(SeedPolicy::IfAbsent).unwrap();
        assert_eq!(report, InitReport::default());

        let categories = storage.categories().list().unwrap();
        assert!(categories.iter().any(|c| c.id == created.id));
    }

    #[test]
    fn test_initialize_always_discards_edits() {
        let storage = Storage::in_memory();
        storage.initialize(SeedPolicy::IfAbsent).unwrap();
        storage
            .categories()
            .update("1", &CategoryPatch::new().name("Renamed"))
            .unwrap();

        let report = storage.initialize(SeedPolicy::Always).unwrap();
        assert!(report.categories_written && report.itineraries_written);
        assert_eq!(storage.categories().list().unwrap(), default_categories());
        assert_eq!(storage.itineraries().list().unwrap(), default_itineraries());
    }

    #[test]
    fn test_initialize_restores_missing_sentinel() {
        let storage = Storage::in_memory();
        storage
            .categories()
            .replace_all(&[Category::new("c1", "Only")])
            .unwrap();

        let report = storage.initialize(SeedPolicy::IfAbsent).unwrap();
        assert!(report.sentinel_restored);

        let ids: Vec<String> = storage
            .categories()
            .list()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c1".to_string(), UNKNOWN_CATEGORY_ID.to_string()]);
    }

    #[test]
    fn test_detached_storage_never_writes() {
        let storage = Storage::detached();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        storage.subscribe_all(move |_| counter.set(counter.get() + 1));

        let report = storage.initialize(SeedPolicy::Always).unwrap();
        assert_eq!(report, InitReport::default());

        storage.categories().add(NewCategory::new("Lost")).unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(storage.categories().list().unwrap(), default_categories());
    }

    #[test]
    fn test_corrupt_state_is_reported() {
        let storage = Storage::in_memory();
        storage
            .write_raw(StoreKey::Itineraries, "{not json")
            .unwrap();

        match storage.itineraries().list() {
            Err(StorageError::CorruptState { key, .. }) => {
                assert_eq!(key, StoreKey::Itineraries)
            }
            other => panic!("expected CorruptState, got {:?}", other),
        }
        assert!(storage.initialize(SeedPolicy::IfAbsent).is_err());
    }
}
