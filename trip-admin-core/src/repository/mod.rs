//! Repositories over the persisted collections.
//!
//! Each operation reads the whole collection, works on that copy and writes
//! the whole collection back. Every write goes through `replace_all`, which
//! emits one change notification.

mod category;
mod itinerary;

pub use category::CategoryRepository;
pub use itinerary::ItineraryRepository;
