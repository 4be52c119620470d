use crate::defaults::{default_categories, UNKNOWN_CATEGORY_ID};
use crate::events::ChangePayload;
use crate::models::{Category, CategoryPatch, NewCategory};
use crate::storage::{Storage, StorageError};
use crate::store::StoreKey;

pub struct CategoryRepository<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Lists stored categories, or the default set when nothing is stored.
    ///
    /// The defaults are not persisted here; see [`Storage::initialize`].
    pub fn list(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self
            .storage
            .load::<Category>(StoreKey::Categories)?
            .unwrap_or_else(default_categories))
    }

    pub fn get(&self, id: &str) -> Result<Option<Category>, StorageError> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Writes the full collection and notifies subscribers.
    pub fn replace_all(&self, categories: &[Category]) -> Result<(), StorageError> {
        if self.storage.save(StoreKey::Categories, categories)? {
            self.storage
                .bus()
                .emit(ChangePayload::Categories(categories.to_vec()));
        }
        Ok(())
    }

    pub fn add(&self, category: NewCategory) -> Result<Category, StorageError> {
        let mut categories = self.list()?;
        let id = self
            .storage
            .ids()
            .next_id(|candidate| categories.iter().any(|c| c.id == candidate));

        let created = category.into_category(id);
        categories.push(created.clone());
        self.replace_all(&categories)?;

        tracing::debug!(id = %created.id, name = %created.name, "category added");
        Ok(created)
    }

    /// Applies `patch` to the category with `id`. `Ok(None)` if there is none.
    pub fn update(
        &self,
        id: &str,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, StorageError> {
        let mut categories = self.list()?;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        patch.apply_to(category);
        let updated = category.clone();
        self.replace_all(&categories)?;
        Ok(Some(updated))
    }

    /// Removes the category with `id` and moves its itineraries to the
    /// sentinel category.
    ///
    /// Returns false without writing when no category matches. The sentinel
    /// itself is never removed: deleting [`UNKNOWN_CATEGORY_ID`] returns
    /// false and writes nothing.
    ///
    /// Both collections are read before either is written. The itinerary
    /// collection is rewritten even when nothing moved, so subscribers see
    /// a categories event followed by an itineraries event.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        if id == UNKNOWN_CATEGORY_ID {
            tracing::warn!("refusing to delete the sentinel category");
            return Ok(false);
        }

        let categories = self.list()?;
        let remaining: Vec<Category> = categories.iter().filter(|c| c.id != id).cloned().collect();
        if remaining.len() == categories.len() {
            return Ok(false);
        }

        let itineraries = self.storage.itineraries();
        let (reassigned, moved) =
            itineraries.with_category_reassigned(id, UNKNOWN_CATEGORY_ID)?;

        self.replace_all(&remaining)?;
        itineraries.replace_all(&reassigned)?;
        tracing::debug!(id, moved, "category deleted");
        Ok(true)
    }
}
