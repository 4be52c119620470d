use clap::{Args, Subcommand};
use trip_admin_core::{Category, CategoryPatch, NewCategory, Storage, UNKNOWN_CATEGORY_ID};

use super::{confirm, truncate, OutputFormat};

#[derive(Args)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// List categories with their itinerary counts
    List {
        /// Only show active categories
        #[arg(long)]
        active: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a category's details
    Show {
        /// Category ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new category
    Add {
        /// Name of the category
        name: String,

        /// Create the category as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Update an existing category
    Update {
        /// Category ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Mark as active
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Mark as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Delete a category, moving its itineraries to "Unknown Category"
    Delete {
        /// Category ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List the itineraries in a category
    Itineraries {
        /// Category ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Finds a category by id, falling back to a case-insensitive name match.
pub(crate) fn find_category(
    storage: &Storage,
    identifier: &str,
) -> Result<Category, Box<dyn std::error::Error>> {
    let categories = storage.categories().list()?;
    categories
        .iter()
        .find(|c| c.id == identifier)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(identifier))
        })
        .cloned()
        .ok_or_else(|| format!("Category not found: {}", identifier).into())
}

impl CategoryCommand {
    pub fn run(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CategorySubcommand::List { active, format } => {
                let summaries: Vec<_> = storage
                    .catalog()
                    .categories_with_counts()?
                    .into_iter()
                    .filter(|s| !active || s.category.is_active)
                    .collect();

                if summaries.is_empty() {
                    println!("No categories found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&summaries)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<15}  {:<30}  {:<8}  ITINERARIES",
                            "ID", "NAME", "STATUS"
                        );
                        println!("{}", "-".repeat(72));
                        for summary in &summaries {
                            println!(
                                "{:<15}  {:<30}  {:<8}  {}",
                                summary.category.id,
                                truncate(&summary.category.name, 30),
                                summary.category.status_label(),
                                summary.itinerary_count
                            );
                        }
                        println!("\nTotal: {} category(ies)", summaries.len());
                    }
                }
                Ok(())
            }

            CategorySubcommand::Show { identifier, format } => {
                let category = find_category(storage, identifier)?;
                let count = storage
                    .catalog()
                    .itineraries_in_category(&category.id)?
                    .len();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&category)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", category.name);
                        println!("{}", "=".repeat(category.name.chars().count()));
                        println!("ID: {}", category.id);
                        println!("Status: {}", category.status_label());
                        println!("Itineraries: {}", count);
                    }
                }
                Ok(())
            }

            CategorySubcommand::Add { name, inactive } => {
                let new_category = NewCategory::new(name.trim()).with_active(!inactive);
                new_category.validate()?;

                let created = storage.categories().add(new_category)?;
                println!("Created category: {}", created);
                Ok(())
            }

            CategorySubcommand::Update {
                identifier,
                name,
                active,
                inactive,
            } => {
                let mut patch = CategoryPatch::new();
                if let Some(name) = name {
                    if name.trim().is_empty() {
                        return Err("Category name cannot be empty".into());
                    }
                    patch = patch.name(name.trim());
                }
                if *active {
                    patch = patch.active(true);
                }
                if *inactive {
                    patch = patch.active(false);
                }

                if patch.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let category = find_category(storage, identifier)?;
                match storage.categories().update(&category.id, &patch)? {
                    Some(updated) => {
                        println!("Updated category: {}", updated);
                        Ok(())
                    }
                    None => Err(format!("Category not found: {}", identifier).into()),
                }
            }

            CategorySubcommand::Delete { identifier, force } => {
                let category = find_category(storage, identifier)?;
                if category.id == UNKNOWN_CATEGORY_ID {
                    return Err("The \"Unknown Category\" cannot be deleted".into());
                }

                if !force {
                    let affected = storage
                        .catalog()
                        .itineraries_in_category(&category.id)?
                        .len();
                    let prompt = if affected > 0 {
                        format!(
                            "Category '{}' has {} itinerary(ies). Deleting it will move them to \"Unknown Category\". Continue?",
                            category.name, affected
                        )
                    } else {
                        format!("Delete category '{}'?", category.name)
                    };
                    if !confirm(&prompt)? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                if storage.categories().delete(&category.id)? {
                    println!("Deleted category: {}", category.name);
                    Ok(())
                } else {
                    Err(format!("Category not found: {}", identifier).into())
                }
            }

            CategorySubcommand::Itineraries { identifier, format } => {
                let category = find_category(storage, identifier)?;
                let itineraries = storage.catalog().itineraries_in_category(&category.id)?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&itineraries)?);
                    }
                    OutputFormat::Text => {
                        if itineraries.is_empty() {
                            println!("No itineraries in {}", category.name);
                            return Ok(());
                        }
                        println!("Itineraries in {}:", category.name);
                        for itinerary in &itineraries {
                            println!(
                                "  {:<15}  {}  ({})",
                                itinerary.id,
                                itinerary.title,
                                itinerary.duration_label()
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_admin_core::SeedPolicy;

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        storage.initialize(SeedPolicy::IfAbsent).unwrap();
        storage
    }

    fn run(storage: &Storage, command: CategorySubcommand) {
        CategoryCommand { command }.run(storage).unwrap();
    }

    #[test]
    fn test_find_category_by_id_or_name() {
        let storage = seeded();
        assert_eq!(find_category(&storage, "2").unwrap().name, "Beach Holidays");
        assert_eq!(find_category(&storage, "wildlife").unwrap().id, "4");
        assert!(find_category(&storage, "Space").is_err());
    }

    #[test]
    fn test_add_and_update() {
        let storage = seeded();
        run(
            &storage,
            CategorySubcommand::Add {
                name: "  Safari ".into(),
                inactive: true,
            },
        );
        let created = find_category(&storage, "safari").unwrap();
        assert_eq!(created.name, "Safari");
        assert!(!created.is_active);

        run(
            &storage,
            CategorySubcommand::Update {
                identifier: created.id.clone(),
                name: None,
                active: true,
                inactive: false,
            },
        );
        assert!(find_category(&storage, &created.id).unwrap().is_active);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let storage = seeded();
        let result = CategoryCommand {
            command: CategorySubcommand::Add {
                name: "   ".into(),
                inactive: false,
            },
        }
        .run(&storage);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_without_options_fails() {
        let storage = seeded();
        let result = CategoryCommand {
            command: CategorySubcommand::Update {
                identifier: "1".into(),
                name: None,
                active: false,
                inactive: false,
            },
        }
        .run(&storage);
        assert!(result.is_err());
    }

    #[test]
    fn test_forced_delete_moves_itineraries() {
        let storage = seeded();
        run(
            &storage,
            CategorySubcommand::Delete {
                identifier: "Adventure".into(),
                force: true,
            },
        );

        assert!(find_category(&storage, "1").is_err());
        let moved = storage
            .catalog()
            .itineraries_in_category(UNKNOWN_CATEGORY_ID)
            .unwrap();
        assert_eq!(moved.len(), 2);
    }

    #[test]
    fn test_delete_sentinel_fails() {
        let storage = seeded();
        let result = CategoryCommand {
            command: CategorySubcommand::Delete {
                identifier: UNKNOWN_CATEGORY_ID.into(),
                force: true,
            },
        }
        .run(&storage);
        assert!(result.is_err());
    }
}
