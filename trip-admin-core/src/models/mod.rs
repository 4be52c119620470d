mod category;
mod itinerary;
mod validation;

pub use category::{Category, CategoryPatch, NewCategory};
pub use itinerary::{DayPlan, Itinerary, ItineraryPatch, NewItinerary};
pub use validation::{parse_price, ValidationError};
