//! Trip Admin Core Library
//!
//! Catalog models, key-value storage, repositories and change notifications
//! shared by Trip Admin front ends.

pub mod defaults;
pub mod events;
pub mod ids;
pub mod models;
pub mod query;
pub mod repository;
pub mod session;
pub mod storage;
pub mod store;

pub use defaults::{default_categories, default_itineraries, UNKNOWN_CATEGORY_ID};
pub use events::{ChangeBus, ChangeEvent, ChangePayload, CollectionKind, Subscription};
pub use ids::IdGenerator;
pub use models::{
    Category, CategoryPatch, DayPlan, Itinerary, ItineraryPatch, NewCategory, NewItinerary,
    ValidationError,
};
pub use query::{
    CatalogQuery, CategoryRef, CategorySummary, ItineraryWithCategory, UNKNOWN_CATEGORY_LABEL,
    UNKNOWN_CATEGORY_NAME,
};
pub use repository::{CategoryRepository, ItineraryRepository};
pub use session::Session;
pub use storage::{InitReport, SeedPolicy, Storage, StorageError};
pub use store::{DetachedStore, FileStore, KeyValueStore, MemoryStore, StoreError, StoreKey};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
