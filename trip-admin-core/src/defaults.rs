//! Seed catalog used when storage is empty or explicitly reset.

use crate::models::{Category, DayPlan, Itinerary, NewItinerary};

/// Id of the sentinel category that receives orphaned itineraries.
pub const UNKNOWN_CATEGORY_ID: &str = "unknown";

/// The sentinel category record.
pub fn unknown_category() -> Category {
    Category::new(UNKNOWN_CATEGORY_ID, "Unknown Category").inactive()
}

/// Default categories, always ending with the sentinel.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("1", "Adventure"),
        Category::new("2", "Beach Holidays"),
        Category::new("3", "Cultural Tours"),
        Category::new("4", "Wildlife"),
        Category::new("5", "Pilgrimage"),
        unknown_category(),
    ]
}

/// Default itineraries.
pub fn default_itineraries() -> Vec<Itinerary> {
    vec![manali(), churdhar_shimla()]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn manali() -> Itinerary {
    NewItinerary::new("Manali", "1", 5, 67000)
        .with_description(
            "Experience the beauty of Himachal Pradesh with this scenic Manali getaway. \
             From snow-clad mountains and serene temples to riverside camps in Kasol, \
             this trip promises unforgettable memories.",
        )
        .with_nights(4)
        .with_image("/assets/images/shimla&Manali.jpeg")
        .with_rating(4.7)
        .with_highlights(strings(&[
            "Drive through scenic Himalayan roads",
            "Visit Solang Valley & Atal Tunnel",
            "Explore Sissu Lake & waterfalls",
            "Local Manali sightseeing",
            "Kasol & Manikaran excursion",
        ]))
        .with_included(strings(&[
            "Accommodation (Breakfast & Dinner)",
            "Private transportation (Innova Crysta)",
            "Toll taxes & parking",
        ]))
        .with_not_included(strings(&[
            "Flights / Train tickets",
            "Lunch",
            "Adventure activities",
            "Personal expenses",
        ]))
        .with_days(vec![
            DayPlan::new("Chandigarh to Manali – Arrival & Mall Road")
                .with_image("/assets/images/shimla&Manali_1.jpeg")
                .with_description(
                    "Begin your journey from Chandigarh to Manali with a scenic mountain drive.",
                )
                .with_activities([
                    "Pickup from Chandigarh",
                    "Scenic drive to Manali (6–7 hours)",
                    "Hotel check-in",
                    "Evening visit to Mall Road",
                    "Dinner and overnight stay",
                ]),
            DayPlan::new("Solang Valley & Atal Tunnel Excursion")
                .with_image("/assets/images/manali-day2.jpg")
                .with_description("Explore high-altitude attractions and breathtaking landscapes.")
                .with_activities([
                    "Breakfast at hotel",
                    "Visit Solang Valley",
                    "Drive through Atal Tunnel",
                    "Visit Sissu Lake",
                    "Return to hotel for dinner",
                ]),
            DayPlan::new("Manali Local Sightseeing")
                .with_image("/assets/images/manali-day3.jpg")
                .with_description("Discover the cultural and spiritual charm of Manali.")
                .with_activities([
                    "Hidimba Devi Temple",
                    "Buddhist Monastery",
                    "Old Manali walk",
                    "Vashisht Kund",
                    "Mall Road visit",
                ]),
            DayPlan::new("Manali to Kasol & Manikaran")
                .with_image("/assets/images/manali-day4.jpg")
                .with_description("Visit Parvati Valley and enjoy riverside camping.")
                .with_activities([
                    "Drive to Kasol",
                    "Visit Manikaran Gurudwara",
                    "Explore Kasol market",
                    "Riverside camp stay",
                    "Dinner at camps",
                ]),
            DayPlan::new("Return Journey")
                .with_image("/assets/images/manali-day5.jpg")
                .with_description("Conclude your journey with beautiful memories.")
                .with_activities(["Breakfast", "Checkout", "Return to Ambala", "Trip ends"]),
        ])
        .into_itinerary("2".to_string())
}

fn churdhar_shimla() -> Itinerary {
    NewItinerary::new("Delhi – Churdhar – Shimla", "1", 6, 18999)
        .with_description(
            "Experience the untouched beauty of Himachal Pradesh with this adventurous \
             Churdhar trek combined with leisure time in Shimla. From remote mountain \
             villages and forest trails to breathtaking sunrise views from Churdhar Peak \
             (3650 m) and the colonial charm of Shimla, this tour offers the perfect blend \
             of trekking, culture, and relaxation.",
        )
        .with_nights(5)
        .with_image(
            "https://images.unsplash.com/photo-1609232529165-da44951373fa?q=80&w=735&auto=format&fit=crop",
        )
        .with_rating(4.8)
        .with_highlights(strings(&[
            "Trek to Churdhar Peak (3650 m)",
            "Stay in scenic mountain camps",
            "Bonfire & candlelight dinner under the stars",
            "Village walk and interaction with locals",
            "Sunrise from Churdhar top",
            "Explore colonial Shimla",
        ]))
        .with_included(strings(&[
            "Accommodation in homestays, camps & hotel",
            "Breakfast and dinner",
            "All transfers as per itinerary",
            "Camping equipment",
            "Bonfire during campsite stays",
            "Experienced trek guide",
            "Forest entry permits",
        ]))
        .with_not_included(strings(&[
            "Lunch on all days",
            "Personal expenses",
            "Adventure activities not mentioned",
            "Travel insurance",
            "Monument entry tickets",
            "Tips & gratuities",
        ]))
        .with_days(vec![
            DayPlan::new("Delhi to Solan – Overnight Journey")
                .with_image("https://images.unsplash.com/photo-1612380635197-a025736ddba1?q=80&w=1170&auto=format&fit=crop")
                .with_description(
                    "Start your adventure with an overnight Volvo bus journey from Delhi to Solan.",
                )
                .with_activities([
                    "Evening departure from Delhi",
                    "Overnight Volvo bus journey",
                    "Scenic mountain road travel",
                ]),
            DayPlan::new("Solan to Gyankot Village")
                .with_image("https://images.unsplash.com/photo-1605689380471-e395f069d0b5?q=80&w=1332&auto=format&fit=crop")
                .with_description(
                    "Arrive in Solan and drive to the peaceful mountain village of Gyankot.",
                )
                .with_activities([
                    "Arrival at Solan bus station",
                    "Meet local driver",
                    "Drive to Gyankot village",
                    "Homestay check-in",
                    "Breakfast & dinner",
                    "Rest and acclimatization",
                ]),
            DayPlan::new("Gyankot – Pab – Jiunthi Trek")
                .with_image("https://images.unsplash.com/photo-1584075612901-259c1bcbd9b2?q=80&w=1074&auto=format&fit=crop")
                .with_description("Drive to Pab and trek through forest trails to Jiunthi village.")
                .with_activities([
                    "Breakfast at homestay",
                    "Drive to Pab",
                    "2–3 hour trek to Jiunthi",
                    "Campsite check-in",
                    "Bonfire & candlelight dinner",
                    "Optional sunset walk",
                ]),
            DayPlan::new("Jiunthi to Bherog / Tisri Trek")
                .with_image("https://plus.unsplash.com/premium_photo-1754590179764-0f36db5fcbb0?q=80&w=1170&auto=format&fit=crop")
                .with_description(
                    "A long yet rewarding trek through alpine landscapes toward Churdhar.",
                )
                .with_activities([
                    "Morning tea with locals",
                    "Village walk",
                    "Breakfast",
                    "14 km trek to Bherog/Tisri",
                    "Packed lunch",
                    "Bonfire & dinner at campsite",
                ]),
            DayPlan::new("Churdhar Peak Sunrise & Shimla Transfer")
                .with_image("https://images.unsplash.com/photo-1740383234486-4137f1dee821?q=80&w=1170&auto=format&fit=crop")
                .with_description(
                    "Early morning trek to Churdhar Peak for sunrise, then descend and drive to Shimla.",
                )
                .with_activities([
                    "Early morning wake-up",
                    "Trek to Churdhar summit",
                    "Sunrise view",
                    "Descend to Churdhar temple",
                    "Breakfast",
                    "Trek down to Madhalani",
                    "Drive to Shimla",
                    "Hotel check-in & dinner",
                ]),
            DayPlan::new("Shimla Sightseeing & Return to Delhi")
                .with_image("https://images.unsplash.com/photo-1609232529165-da44951373fa?q=80&w=735&auto=format&fit=crop")
                .with_description(
                    "Explore Shimla's iconic attractions before returning to Delhi.",
                )
                .with_activities([
                    "Breakfast & checkout",
                    "Jakhoo Temple visit",
                    "Viceregal Lodge",
                    "Christ Church & The Ridge",
                    "Shopping at Mall Road",
                    "Evening dinner",
                    "Overnight Volvo bus to Delhi",
                ]),
        ])
        .into_itinerary("3".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_categories_include_sentinel() {
        let categories = default_categories();
        let sentinel = categories
            .iter()
            .find(|c| c.id == UNKNOWN_CATEGORY_ID)
            .unwrap();
        assert_eq!(sentinel.name, "Unknown Category");
        assert!(!sentinel.is_active);
    }

    #[test]
    fn test_default_ids_are_unique() {
        let categories = default_categories();
        let ids: HashSet<_> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), categories.len());

        let itineraries = default_itineraries();
        let ids: HashSet<_> = itineraries.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), itineraries.len());
    }

    #[test]
    fn test_default_itineraries_reference_seed_categories() {
        let categories = default_categories();
        for itinerary in default_itineraries() {
            assert!(categories.iter().any(|c| c.id == itinerary.category_id));
            assert_eq!(itinerary.days.len() as u32, itinerary.duration);
        }
    }

    #[test]
    fn test_defaults_are_deterministic() {
        assert_eq!(default_categories(), default_categories());
        assert_eq!(default_itineraries(), default_itineraries());
    }
}
