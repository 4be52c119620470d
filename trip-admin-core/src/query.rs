//! Read-only views that join the category and itinerary collections.

use serde::Serialize;

use crate::models::{Category, Itinerary};
use crate::storage::{Storage, StorageError};

/// Name returned by [`CatalogQuery::category_name_for`] when nothing matches
/// or the matching category has an empty name.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Name attached by [`CatalogQuery::itineraries_with_category`] when nothing
/// matches or the matching category has an empty name.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown Category";

/// Denormalized category reference attached to an itinerary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItineraryWithCategory {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub category: CategoryRef,
}

/// A category with the live number of itineraries pointing at it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub itinerary_count: usize,
}

pub struct CatalogQuery<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn category_name_for(&self, category_id: &str) -> Result<String, StorageError> {
        Ok(self
            .storage
            .categories()
            .list()?
            .into_iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()))
    }

    /// Every itinerary, in stored order, with its category resolved.
    pub fn itineraries_with_category(&self) -> Result<Vec<ItineraryWithCategory>, StorageError> {
        let categories = self.storage.categories().list()?;
        let itineraries = self.storage.itineraries().list()?;

        Ok(itineraries
            .into_iter()
            .map(|itinerary| {
                let name = categories
                    .iter()
                    .find(|c| c.id == itinerary.category_id)
                    .map(|c| c.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_string());
                let category = CategoryRef {
                    id: itinerary.category_id.clone(),
                    name,
                };
                ItineraryWithCategory {
                    itinerary,
                    category,
                }
            })
            .collect())
    }

    pub fn categories_with_counts(&self) -> Result<Vec<CategorySummary>, StorageError> {
        let categories = self.storage.categories().list()?;
        let itineraries = self.storage.itineraries().list()?;

        Ok(categories
            .into_iter()
            .map(|category| {
                let itinerary_count = itineraries
                    .iter()
                    .filter(|i| i.category_id == category.id)
                    .count();
                CategorySummary {
                    category,
                    itinerary_count,
                }
            })
            .collect())
    }

    pub fn itineraries_in_category(&self, category_id: &str) -> Result<Vec<Itinerary>, StorageError> {
        Ok(self
            .storage
            .itineraries()
            .list()?
            .into_iter()
            .filter(|i| i.category_id == category_id)
            .collect())
    }
}
