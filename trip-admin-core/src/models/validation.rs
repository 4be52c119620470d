//! Required-field checks applied by forms before calling a repository.

use thiserror::Error;

use super::{NewCategory, NewItinerary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(String),

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }
}

impl NewItinerary {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("categoryId"));
        }
        if self.duration == 0 {
            return Err(ValidationError::NotPositive("duration"));
        }
        if self.price <= 0 {
            return Err(ValidationError::NotPositive("price"));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange(rating.to_string()));
            }
        }
        Ok(())
    }

    /// Drops blank highlight, inclusion and exclusion entries.
    pub fn without_blank_entries(mut self) -> Self {
        for list in [
            &mut self.highlights,
            &mut self.included,
            &mut self.not_included,
        ] {
            list.retain(|entry| !entry.trim().is_empty());
        }
        self
    }
}

/// Parses a price typed into a form, keeping only its digits.
///
/// `"₹18,999"` becomes `18999`.
pub fn parse_price(input: &str) -> Result<i64, ValidationError> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ValidationError::InvalidPrice(input.to_string()));
    }
    digits
        .parse()
        .map_err(|_| ValidationError::InvalidPrice(input.to_string()))
}
