use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use trip_admin_core::models::parse_price;
use trip_admin_core::{DayPlan, ItineraryPatch, NewItinerary, Storage};

use super::category::find_category;
use super::{confirm, truncate, OutputFormat};

#[derive(Args)]
pub struct ItineraryCommand {
    #[command(subcommand)]
    pub command: ItinerarySubcommand,
}

#[derive(Subcommand)]
pub enum ItinerarySubcommand {
    /// List itineraries with their category names
    List {
        /// Filter by category ID or name
        #[arg(long)]
        category: Option<String>,

        /// Only show active itineraries
        #[arg(long)]
        active: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an itinerary's details
    Show {
        /// Itinerary ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new itinerary
    Add {
        /// Title of the itinerary
        title: String,

        /// Category ID or name
        #[arg(long)]
        category: String,

        /// Duration in days
        #[arg(long)]
        duration: u32,

        /// Number of nights (defaults to duration - 1)
        #[arg(long)]
        nights: Option<u32>,

        /// Price in whole currency units; separators and symbols are ignored
        #[arg(long)]
        price: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Image URL or path
        #[arg(long)]
        image: Option<String>,

        /// Rating between 0 and 5
        #[arg(long)]
        rating: Option<f64>,

        /// Create the itinerary as inactive
        #[arg(long)]
        inactive: bool,

        /// Highlight (can be repeated)
        #[arg(long = "highlight", value_name = "TEXT")]
        highlights: Vec<String>,

        /// Included item (can be repeated)
        #[arg(long = "included", value_name = "TEXT")]
        included: Vec<String>,

        /// Excluded item (can be repeated)
        #[arg(long = "not-included", value_name = "TEXT")]
        not_included: Vec<String>,

        /// JSON file with the day-by-day plan
        #[arg(long, value_name = "FILE")]
        days_file: Option<PathBuf>,
    },

    /// Update an existing itinerary
    Update {
        /// Itinerary ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New category ID or name
        #[arg(long)]
        category: Option<String>,

        /// Duration in days
        #[arg(long)]
        duration: Option<u32>,

        /// Number of nights
        #[arg(long, conflicts_with = "clear_nights")]
        nights: Option<u32>,

        /// Remove the stored night count
        #[arg(long)]
        clear_nights: bool,

        /// Price in whole currency units
        #[arg(long)]
        price: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Image URL or path
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,

        /// Remove the image
        #[arg(long)]
        clear_image: bool,

        /// Rating between 0 and 5
        #[arg(long, conflicts_with = "clear_rating")]
        rating: Option<f64>,

        /// Remove the rating
        #[arg(long)]
        clear_rating: bool,

        /// Mark as active
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Mark as inactive
        #[arg(long)]
        inactive: bool,

        /// Replace highlights (can be repeated)
        #[arg(long = "highlight", value_name = "TEXT")]
        highlights: Vec<String>,

        /// Replace included items (can be repeated)
        #[arg(long = "included", value_name = "TEXT")]
        included: Vec<String>,

        /// Replace excluded items (can be repeated)
        #[arg(long = "not-included", value_name = "TEXT")]
        not_included: Vec<String>,

        /// Replace the day plan from a JSON file
        #[arg(long, value_name = "FILE")]
        days_file: Option<PathBuf>,
    },

    /// Move an itinerary to another category
    Move {
        /// Itinerary ID
        id: String,

        /// Target category ID or name
        category: String,
    },

    /// Delete an itinerary
    Delete {
        /// Itinerary ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

fn read_days(path: &Path) -> Result<Vec<DayPlan>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read days file '{}': {}", path.display(), e))?;
    let days = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse days file '{}': {}", path.display(), e))?;
    Ok(days)
}

fn non_blank(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .collect()
}

impl ItineraryCommand {
    pub fn run(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ItinerarySubcommand::List {
                category,
                active,
                format,
            } => {
                let category_id = match category {
                    Some(identifier) => Some(find_category(storage, identifier)?.id),
                    None => None,
                };

                let entries: Vec<_> = storage
                    .catalog()
                    .itineraries_with_category()?
                    .into_iter()
                    .filter(|e| category_id.as_ref().map_or(true, |id| e.category.id == *id))
                    .filter(|e| !active || e.itinerary.is_active)
                    .collect();

                if entries.is_empty() {
                    println!("No itineraries found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<15}  {:<30}  {:<20}  {:<18}  {:>10}  STATUS",
                            "ID", "TITLE", "CATEGORY", "DURATION", "PRICE"
                        );
                        println!("{}", "-".repeat(110));
                        for entry in &entries {
                            let itinerary = &entry.itinerary;
                            println!(
                                "{:<15}  {:<30}  {:<20}  {:<18}  {:>10}  {}",
                                itinerary.id,
                                truncate(&itinerary.title, 30),
                                truncate(&entry.category.name, 20),
                                itinerary.duration_label(),
                                itinerary.price,
                                itinerary.status_label()
                            );
                        }
                        println!("\nTotal: {} itinerary(ies)", entries.len());
                    }
                }
                Ok(())
            }

            ItinerarySubcommand::Show { id, format } => {
                let entry = storage
                    .catalog()
                    .itineraries_with_category()?
                    .into_iter()
                    .find(|e| e.itinerary.id == *id)
                    .ok_or_else(|| format!("Itinerary not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entry)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", entry.itinerary);
                        println!("Category name: {}", entry.category.name);
                    }
                }
                Ok(())
            }

            ItinerarySubcommand::Add {
                title,
                category,
                duration,
                nights,
                price,
                description,
                image,
                rating,
                inactive,
                highlights,
                included,
                not_included,
                days_file,
            } => {
                let category = find_category(storage, category)?;
                let mut itinerary =
                    NewItinerary::new(title.trim(), category.id, *duration, parse_price(price)?)
                        .with_active(!inactive)
                        .with_highlights(highlights.clone())
                        .with_included(included.clone())
                        .with_not_included(not_included.clone())
                        .without_blank_entries();

                if let Some(nights) = nights {
                    itinerary = itinerary.with_nights(*nights);
                }
                if let Some(description) = description {
                    itinerary = itinerary.with_description(description);
                }
                if let Some(image) = image {
                    itinerary = itinerary.with_image(image);
                }
                if let Some(rating) = rating {
                    itinerary = itinerary.with_rating(*rating);
                }
                if let Some(path) = days_file {
                    itinerary = itinerary.with_days(read_days(path)?);
                }

                itinerary.validate()?;

                let created = storage.itineraries().add(itinerary)?;
                println!("Created itinerary:");
                println!("{}", created);
                Ok(())
            }

            ItinerarySubcommand::Update {
                id,
                title,
                category,
                duration,
                nights,
                clear_nights,
                price,
                description,
                image,
                clear_image,
                rating,
                clear_rating,
                active,
                inactive,
                highlights,
                included,
                not_included,
                days_file,
            } => {
                let mut patch = ItineraryPatch::new();

                if let Some(title) = title {
                    if title.trim().is_empty() {
                        return Err("Title cannot be empty".into());
                    }
                    patch = patch.title(title.trim());
                }
                if let Some(identifier) = category {
                    patch = patch.category_id(find_category(storage, identifier)?.id);
                }
                if let Some(duration) = duration {
                    if *duration == 0 {
                        return Err("Duration must be greater than zero".into());
                    }
                    patch = patch.duration(*duration);
                }
                if let Some(nights) = nights {
                    patch = patch.nights(Some(*nights));
                }
                if *clear_nights {
                    patch = patch.nights(None);
                }
                if let Some(price) = price {
                    patch = patch.price(parse_price(price)?);
                }
                if let Some(description) = description {
                    patch = patch.description(description);
                }
                if let Some(image) = image {
                    patch = patch.image(Some(image.clone()));
                }
                if *clear_image {
                    patch = patch.image(None);
                }
                if let Some(rating) = rating {
                    if !(0.0..=5.0).contains(rating) {
                        return Err(format!("Rating must be between 0 and 5, got {}", rating).into());
                    }
                    patch = patch.rating(Some(*rating));
                }
                if *clear_rating {
                    patch = patch.rating(None);
                }
                if *active {
                    patch = patch.active(true);
                }
                if *inactive {
                    patch = patch.active(false);
                }
                if !highlights.is_empty() {
                    patch = patch.highlights(non_blank(highlights));
                }
                if !included.is_empty() {
                    patch = patch.included(non_blank(included));
                }
                if !not_included.is_empty() {
                    patch = patch.not_included(non_blank(not_included));
                }
                if let Some(path) = days_file {
                    patch = patch.days(read_days(path)?);
                }

                if patch.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                match storage.itineraries().update(id, &patch)? {
                    Some(updated) => {
                        println!("Updated itinerary:");
                        println!("{}", updated);
                        Ok(())
                    }
                    None => Err(format!("Itinerary not found: {}", id).into()),
                }
            }

            ItinerarySubcommand::Move { id, category } => {
                let category = find_category(storage, category)?;
                match storage.itineraries().move_to_category(id, &category.id)? {
                    Some(moved) => {
                        println!("Moved '{}' to {}", moved.title, category.name);
                        Ok(())
                    }
                    None => Err(format!("Itinerary not found: {}", id).into()),
                }
            }

            ItinerarySubcommand::Delete { id, force } => {
                let itinerary = storage
                    .itineraries()
                    .get(id)?
                    .ok_or_else(|| format!("Itinerary not found: {}", id))?;

                if !force && !confirm(&format!("Delete itinerary '{}'?", itinerary.title))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                storage.itineraries().delete(&itinerary.id)?;
                println!("Deleted itinerary: {}", itinerary.title);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use trip_admin_core::SeedPolicy;

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        storage.initialize(SeedPolicy::IfAbsent).unwrap();
        storage
    }

    fn add_command(title: &str, category: &str, price: &str) -> ItinerarySubcommand {
        ItinerarySubcommand::Add {
            title: title.into(),
            category: category.into(),
            duration: 4,
            nights: None,
            price: price.into(),
            description: None,
            image: None,
            rating: Some(4.5),
            inactive: false,
            highlights: vec!["Beach".into(), " ".into()],
            included: vec![],
            not_included: vec![],
            days_file: None,
        }
    }

    fn update_command(id: &str) -> ItinerarySubcommand {
        ItinerarySubcommand::Update {
            id: id.into(),
            title: None,
            category: None,
            duration: None,
            nights: None,
            clear_nights: false,
            price: None,
            description: None,
            image: None,
            clear_image: false,
            rating: None,
            clear_rating: false,
            active: false,
            inactive: false,
            highlights: vec![],
            included: vec![],
            not_included: vec![],
            days_file: None,
        }
    }

    fn newest(storage: &Storage) -> trip_admin_core::Itinerary {
        storage.itineraries().list().unwrap().pop().unwrap()
    }

    #[test]
    fn test_add_resolves_category_and_cleans_input() {
        let storage = seeded();
        ItineraryCommand {
            command: add_command("Goa", "beach holidays", "₹24,000"),
        }
        .run(&storage)
        .unwrap();

        let created = newest(&storage);
        assert_eq!(created.title, "Goa");
        assert_eq!(created.category_id, "2");
        assert_eq!(created.price, 24000);
        assert_eq!(created.highlights, vec!["Beach".to_string()]);
    }

    #[test]
    fn test_add_rejects_unknown_category() {
        let storage = seeded();
        let result = ItineraryCommand {
            command: add_command("Goa", "Space Travel", "1000"),
        }
        .run(&storage);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_reads_days_file() {
        let storage = seeded();
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("days.json");
        std::fs::write(
            &path,
            r#"[{"title":"Arrival","activities":["Check-in"]},{"title":"Departure"}]"#,
        )
        .unwrap();

        let mut command = add_command("Goa", "2", "1000");
        if let ItinerarySubcommand::Add { days_file, .. } = &mut command {
            *days_file = Some(path);
        }
        ItineraryCommand { command }.run(&storage).unwrap();

        let created = newest(&storage);
        assert_eq!(created.days.len(), 2);
        assert_eq!(created.days[0].activities, vec!["Check-in".to_string()]);
    }

    #[test]
    fn test_update_clears_and_sets_fields() {
        let storage = seeded();
        let mut command = update_command("2");
        if let ItinerarySubcommand::Update {
            clear_rating,
            price,
            inactive,
            ..
        } = &mut command
        {
            *clear_rating = true;
            *price = Some("70,000".into());
            *inactive = true;
        }
        ItineraryCommand { command }.run(&storage).unwrap();

        let updated = storage.itineraries().get("2").unwrap().unwrap();
        assert_eq!(updated.rating, None);
        assert_eq!(updated.price, 70000);
        assert!(!updated.is_active);
        assert_eq!(updated.title, "Manali");
    }

    #[test]
    fn test_update_without_options_fails() {
        let storage = seeded();
        let result = ItineraryCommand {
            command: update_command("2"),
        }
        .run(&storage);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_and_delete() {
        let storage = seeded();
        ItineraryCommand {
            command: ItinerarySubcommand::Move {
                id: "3".into(),
                category: "Wildlife".into(),
            },
        }
        .run(&storage)
        .unwrap();
        assert_eq!(
            storage.itineraries().get("3").unwrap().unwrap().category_id,
            "4"
        );

        ItineraryCommand {
            command: ItinerarySubcommand::Delete {
                id: "3".into(),
                force: true,
            },
        }
        .run(&storage)
        .unwrap();
        assert!(storage.itineraries().get("3").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_fails() {
        let storage = seeded();
        let result = ItineraryCommand {
            command: ItinerarySubcommand::Delete {
                id: "missing".into(),
                force: true,
            },
        }
        .run(&storage);
        assert!(result.is_err());
    }
}
