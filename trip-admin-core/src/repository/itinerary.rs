use crate::defaults::default_itineraries;
use crate::events::ChangePayload;
use crate::models::{Itinerary, ItineraryPatch, NewItinerary};
use crate::storage::{Storage, StorageError};
use crate::store::StoreKey;

pub struct ItineraryRepository<'a> {
    storage: &'a Storage,
}

impl<'a> ItineraryRepository<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Lists stored itineraries, or the default set when nothing is stored.
    pub fn list(&self) -> Result<Vec<Itinerary>, StorageError> {
        Ok(self
            .storage
            .load::<Itinerary>(StoreKey::Itineraries)?
            .unwrap_or_else(default_itineraries))
    }

    pub fn get(&self, id: &str) -> Result<Option<Itinerary>, StorageError> {
        Ok(self.list()?.into_iter().find(|i| i.id == id))
    }

    /// Writes the full collection and notifies subscribers.
    pub fn replace_all(&self, itineraries: &[Itinerary]) -> Result<(), StorageError> {
        if self.storage.save(StoreKey::Itineraries, itineraries)? {
            self.storage
                .bus()
                .emit(ChangePayload::Itineraries(itineraries.to_vec()));
        }
        Ok(())
    }

    pub fn add(&self, itinerary: NewItinerary) -> Result<Itinerary, StorageError> {
        let mut itineraries = self.list()?;
        let id = self
            .storage
            .ids()
            .next_id(|candidate| itineraries.iter().any(|i| i.id == candidate));

        let created = itinerary.into_itinerary(id);
        itineraries.push(created.clone());
        self.replace_all(&itineraries)?;

        tracing::debug!(id = %created.id, title = %created.title, "itinerary added");
        Ok(created)
    }

    /// Applies `patch` to the itinerary with `id`. `Ok(None)` if there is none.
    pub fn update(
        &self,
        id: &str,
        patch: &ItineraryPatch,
    ) -> Result<Option<Itinerary>, StorageError> {
        let mut itineraries = self.list()?;
        let Some(itinerary) = itineraries.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        patch.apply_to(itinerary);
        let updated = itinerary.clone();
        self.replace_all(&itineraries)?;
        Ok(Some(updated))
    }

    /// Points an itinerary at another category.
    pub fn move_to_category(
        &self,
        id: &str,
        category_id: &str,
    ) -> Result<Option<Itinerary>, StorageError> {
        self.update(id, &ItineraryPatch::new().category_id(category_id))
    }

    /// Removes the itinerary with `id`. Returns false without writing when
    /// none matches.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let itineraries = self.list()?;
        let remaining: Vec<Itinerary> = itineraries
            .iter()
            .filter(|i| i.id != id)
            .cloned()
            .collect();
        if remaining.len() == itineraries.len() {
            return Ok(false);
        }

        self.replace_all(&remaining)?;
        tracing::debug!(id, "itinerary deleted");
        Ok(true)
    }

    /// The stored collection with every itinerary in category `from`
    /// re-pointed to `to`, plus how many moved. Nothing is written.
    pub(crate) fn with_category_reassigned(
        &self,
        from: &str,
        to: &str,
    ) -> Result<(Vec<Itinerary>, usize), StorageError> {
        let mut itineraries = self.list()?;
        let mut moved = 0;
        for itinerary in itineraries.iter_mut().filter(|i| i.category_id == from) {
            itinerary.category_id = to.to_string();
            moved += 1;
        }
        Ok((itineraries, moved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChangeEvent, CollectionKind};
    use crate::models::DayPlan;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn empty() -> Storage {
        let storage = Storage::in_memory();
        storage.itineraries().replace_all(&[]).unwrap();
        storage
    }

    fn goa() -> NewItinerary {
        NewItinerary::new("Goa", "2", 4, 24000)
            .with_nights(3)
            .with_rating(4.2)
            .with_highlights(vec!["Baga beach".into(), "Old Goa churches".into()])
            .with_days(vec![DayPlan::new("Arrival").with_activities(["Check-in"])])
    }

    #[test]
    fn test_list_absent_returns_defaults() {
        let storage = Storage::in_memory();
        assert_eq!(storage.itineraries().list().unwrap(), default_itineraries());
        assert_eq!(
            storage.itineraries().list().unwrap(),
            storage.itineraries().list().unwrap()
        );
    }

    #[test]
    fn test_replace_all_roundtrip() {
        let storage = Storage::in_memory();
        let mut collection = default_itineraries();
        collection.reverse();
        storage.itineraries().replace_all(&collection).unwrap();
        assert_eq!(storage.itineraries().list().unwrap(), collection);
    }

    #[test]
    fn test_add_and_get() {
        let storage = empty();
        let created = storage.itineraries().add(goa()).unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Goa");
        assert_eq!(storage.itineraries().get(&created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_add_twice_gives_distinct_ids() {
        let storage = empty();
        let first = storage.itineraries().add(goa()).unwrap();
        let second = storage.itineraries().add(goa()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(storage.itineraries().list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_preserves_untouched_fields() {
        let storage = empty();
        let created = storage.itineraries().add(goa()).unwrap();

        let updated = storage
            .itineraries()
            .update(&created.id, &ItineraryPatch::new().title("North Goa"))
            .unwrap()
            .unwrap();

        let mut expected = created.clone();
        expected.title = "North Goa".to_string();
        assert_eq!(updated, expected);
        assert_eq!(storage.itineraries().get(&created.id).unwrap(), Some(expected));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let storage = empty();
        storage.itineraries().add(goa()).unwrap();
        let before = storage.itineraries().list().unwrap();

        let result = storage
            .itineraries()
            .update("nonexistent", &ItineraryPatch::new().price(1))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(storage.itineraries().list().unwrap(), before);
    }

    #[test]
    fn test_move_to_category() {
        let storage = empty();
        let created = storage.itineraries().add(goa()).unwrap();

        let moved = storage
            .itineraries()
            .move_to_category(&created.id, "4")
            .unwrap()
            .unwrap();
        assert_eq!(moved.category_id, "4");
        assert!(storage
            .itineraries()
            .move_to_category("missing", "4")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete() {
        let storage = empty();
        let created = storage.itineraries().add(goa()).unwrap();

        assert!(storage.itineraries().delete(&created.id).unwrap());
        assert!(!storage.itineraries().delete(&created.id).unwrap());
        assert!(storage.itineraries().list().unwrap().is_empty());
    }

    #[test]
    fn test_each_write_emits_one_notification_with_full_collection() {
        let storage = empty();
        let events: Rc<RefCell<Vec<ChangeEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        storage.subscribe(CollectionKind::Itineraries, move |event| {
            sink.borrow_mut().push(event.clone())
        });

        let created = storage.itineraries().add(goa()).unwrap();
        storage
            .itineraries()
            .update(&created.id, &ItineraryPatch::new().active(false))
            .unwrap();
        storage.itineraries().add(goa()).unwrap();
        storage.itineraries().delete(&created.id).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 4);
        for event in events.iter() {
            assert_eq!(event.kind(), CollectionKind::Itineraries);
        }

        let ChangePayload::Itineraries(last) = &events[3].payload else {
            panic!("expected itinerary payload");
        };
        assert_eq!(*last, storage.itineraries().list().unwrap());
    }

    #[test]
    fn test_listener_can_requery() {
        let storage = Rc::new(empty());
        let seen = Rc::new(RefCell::new(Vec::new()));

        {
            let weak = Rc::downgrade(&storage);
            let seen = Rc::clone(&seen);
            storage.subscribe_all(move |_| {
                if let Some(storage) = weak.upgrade() {
                    let count = storage.itineraries().list().unwrap().len();
                    seen.borrow_mut().push(count);
                }
            });
        }

        storage.itineraries().add(goa()).unwrap();
        storage.itineraries().add(goa()).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
