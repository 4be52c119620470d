//! Well-known storage keys.

use std::fmt;

/// Keys the admin console reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Categories,
    Itineraries,
    AdminToken,
}

impl StoreKey {
    /// Returns the raw key string.
    ///
    /// These match the keys the browser console used, so exported data
    /// stays interchangeable.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Categories => "adminCategories",
            StoreKey::Itineraries => "adminItineraries",
            StoreKey::AdminToken => "adminToken",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
