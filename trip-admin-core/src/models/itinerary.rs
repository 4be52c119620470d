use serde::{Deserialize, Serialize};
use std::fmt;

/// One day of an itinerary's plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DayPlan {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl DayPlan {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }
}

/// A travel package offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: u32, // days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub category_id: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub not_included: Vec<String>,
    #[serde(default)]
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Night count, falling back to one less than the day count when the
    /// stored count is absent or zero.
    pub fn effective_nights(&self) -> u32 {
        self.nights
            .filter(|&n| n > 0)
            .unwrap_or_else(|| self.duration.saturating_sub(1))
    }

    /// Duration label as shown in listings, e.g. "5 Days / 4 Nights".
    pub fn duration_label(&self) -> String {
        format!("{} Days / {} Nights", self.duration, self.effective_nights())
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Category: {}", self.category_id)?;
        writeln!(f, "Duration: {}", self.duration_label())?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "Status: {}", self.status_label())?;

        if let Some(rating) = self.rating {
            writeln!(f, "Rating: {:.1}", rating)?;
        }
        if let Some(image) = &self.image {
            writeln!(f, "Image: {}", image)?;
        }
        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }

        for (heading, items) in [
            ("Highlights", &self.highlights),
            ("Included", &self.included),
            ("Not included", &self.not_included),
        ] {
            if !items.is_empty() {
                writeln!(f, "\n{}:", heading)?;
                for item in items {
                    writeln!(f, "  - {}", item)?;
                }
            }
        }

        for (i, day) in self.days.iter().enumerate() {
            writeln!(f, "\nDay {}: {}", i + 1, day.title)?;
            if !day.description.is_empty() {
                writeln!(f, "  {}", day.description)?;
            }
            for activity in &day.activities {
                writeln!(f, "  * {}", activity)?;
            }
        }

        Ok(())
    }
}

/// An itinerary that has not been assigned an id yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewItinerary {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: u32,
    #[serde(default)]
    pub nights: Option<u32>,
    pub price: i64,
    #[serde(default)]
    pub image: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    pub category_id: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub not_included: Vec<String>,
    #[serde(default)]
    pub days: Vec<DayPlan>,
}

impl NewItinerary {
    pub fn new(
        title: impl Into<String>,
        category_id: impl Into<String>,
        duration: u32,
        price: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            duration,
            nights: None,
            price,
            image: None,
            is_active: true,
            rating: None,
            category_id: category_id.into(),
            highlights: Vec::new(),
            included: Vec::new(),
            not_included: Vec::new(),
            days: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_nights(mut self, nights: u32) -> Self {
        self.nights = Some(nights);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }

    pub fn with_included(mut self, included: Vec<String>) -> Self {
        self.included = included;
        self
    }

    pub fn with_not_included(mut self, not_included: Vec<String>) -> Self {
        self.not_included = not_included;
        self
    }

    pub fn with_days(mut self, days: Vec<DayPlan>) -> Self {
        self.days = days;
        self
    }

    pub(crate) fn into_itinerary(self, id: String) -> Itinerary {
        Itinerary {
            id,
            title: self.title,
            description: self.description,
            duration: self.duration,
            nights: self.nights,
            price: self.price,
            image: self.image,
            is_active: self.is_active,
            rating: self.rating,
            category_id: self.category_id,
            highlights: self.highlights,
            included: self.included,
            not_included: self.not_included,
            days: self.days,
        }
    }
}

/// Fields to overwrite on an existing itinerary.
///
/// `None` leaves a field untouched. Fields that are optional on the record
/// take `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub nights: Option<Option<u32>>,
    pub price: Option<i64>,
    pub image: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub rating: Option<Option<f64>>,
    pub category_id: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub included: Option<Vec<String>>,
    pub not_included: Option<Vec<String>>,
    pub days: Option<Vec<DayPlan>>,
}

impl ItineraryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn nights(mut self, nights: Option<u32>) -> Self {
        self.nights = Some(nights);
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn rating(mut self, rating: Option<f64>) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    pub fn included(mut self, included: Vec<String>) -> Self {
        self.included = Some(included);
        self
    }

    pub fn not_included(mut self, not_included: Vec<String>) -> Self {
        self.not_included = Some(not_included);
        self
    }

    pub fn days(mut self, days: Vec<DayPlan>) -> Self {
        self.days = Some(days);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merges the provided fields into `itinerary`.
    pub fn apply_to(&self, itinerary: &mut Itinerary) {
        if let Some(title) = &self.title {
            itinerary.title = title.clone();
        }
        if let Some(description) = &self.description {
            itinerary.description = description.clone();
        }
        if let Some(duration) = self.duration {
            itinerary.duration = duration;
        }
        if let Some(nights) = self.nights {
            itinerary.nights = nights;
        }
        if let Some(price) = self.price {
            itinerary.price = price;
        }
        if let Some(image) = &self.image {
            itinerary.image = image.clone();
        }
        if let Some(is_active) = self.is_active {
            itinerary.is_active = is_active;
        }
        if let Some(rating) = self.rating {
            itinerary.rating = rating;
        }
        if let Some(category_id) = &self.category_id {
            itinerary.category_id = category_id.clone();
        }
        if let Some(highlights) = &self.highlights {
            itinerary.highlights = highlights.clone();
        }
        if let Some(included) = &self.included {
            itinerary.included = included.clone();
        }
        if let Some(not_included) = &self.not_included {
            itinerary.not_included = not_included.clone();
        }
        if let Some(days) = &self.days {
            itinerary.days = days.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Itinerary {
        NewItinerary::new("Manali", "1", 5, 67000)
            .with_nights(4)
            .with_rating(4.7)
            .with_image("/assets/images/manali.jpeg")
            .with_highlights(vec!["Solang Valley".into(), "Atal Tunnel".into()])
            .with_days(vec![DayPlan::new("Arrival").with_activities(["Check-in"])])
            .into_itinerary("42".to_string())
    }

    #[test]
    fn test_effective_nights() {
        let mut itinerary = sample();
        assert_eq!(itinerary.effective_nights(), 4);

        itinerary.nights = None;
        assert_eq!(itinerary.effective_nights(), 4);

        itinerary.nights = Some(0);
        assert_eq!(itinerary.effective_nights(), 4);

        itinerary.nights = Some(7);
        assert_eq!(itinerary.effective_nights(), 7);

        itinerary.duration = 0;
        assert_eq!(itinerary.effective_nights(), 0);
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(sample().duration_label(), "5 Days / 4 Nights");
    }

    #[test]
    fn test_itinerary_json_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["categoryId"], "1");
        assert_eq!(value["isActive"], true);
        assert!(value.get("notIncluded").is_some());
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn test_itinerary_reads_sparse_json() {
        let json = r#"{"id":"9","title":"Goa","duration":3,"price":15000,"isActive":true,"categoryId":"2"}"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.title, "Goa");
        assert!(itinerary.highlights.is_empty());
        assert!(itinerary.days.is_empty());
        assert_eq!(itinerary.nights, None);
        assert_eq!(itinerary.effective_nights(), 2);
    }

    #[test]
    fn test_patch_preserves_untouched_fields() {
        let before = sample();
        let mut after = before.clone();
        ItineraryPatch::new().price(70000).apply_to(&mut after);

        assert_eq!(after.price, 70000);
        after.price = before.price;
        assert_eq!(after, before);
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let mut itinerary = sample();
        ItineraryPatch::new()
            .nights(None)
            .image(None)
            .rating(None)
            .apply_to(&mut itinerary);

        assert_eq!(itinerary.nights, None);
        assert_eq!(itinerary.image, None);
        assert_eq!(itinerary.rating, None);
        assert_eq!(itinerary.title, "Manali");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ItineraryPatch::new().is_empty());
        assert!(!ItineraryPatch::new().category_id("unknown").is_empty());
    }

    #[test]
    fn test_itinerary_display() {
        let output = sample().to_string();
        assert!(output.contains("Manali"));
        assert!(output.contains("5 Days / 4 Nights"));
        assert!(output.contains("Rating: 4.7"));
        assert!(output.contains("  - Solang Valley"));
        assert!(output.contains("Day 1: Arrival"));
    }
}
