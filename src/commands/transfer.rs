use chrono::{DateTime, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trip_admin_core::{Category, Itinerary, Storage, UNKNOWN_CATEGORY_ID};

/// Both collections as written by `export` and read by `import`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    pub categories: Vec<Category>,
    pub itineraries: Vec<Itinerary>,
}

impl Snapshot {
    pub fn capture(storage: &Storage) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            exported_at: Some(Utc::now()),
            categories: storage.categories().list()?,
            itineraries: storage.itineraries().list()?,
        })
    }

    pub fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read snapshot '{}': {}", path.display(), e))?;
        let snapshot = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse snapshot '{}': {}", path.display(), e))?;
        Ok(snapshot)
    }

    /// Replaces both stored collections, categories first.
    pub fn restore(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        if !self.categories.iter().any(|c| c.id == UNKNOWN_CATEGORY_ID) {
            tracing::warn!("imported categories have no \"Unknown Category\"");
        }
        storage.categories().replace_all(&self.categories)?;
        storage.itineraries().replace_all(&self.itineraries)?;
        Ok(())
    }
}

#[derive(Args)]
pub struct ExportCommand {
    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = Snapshot::capture(storage)?;
        let json = serde_json::to_string_pretty(&snapshot)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, json)?;
                println!(
                    "Exported {} category(ies) and {} itinerary(ies) to {}",
                    snapshot.categories.len(),
                    snapshot.itineraries.len(),
                    path.display()
                );
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// Snapshot file produced by `export`
    pub file: PathBuf,
}

impl ImportCommand {
    pub fn run(&self, storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = Snapshot::read(&self.file)?;
        snapshot.restore(storage)?;
        println!(
            "Imported {} category(ies) and {} itinerary(ies)",
            snapshot.categories.len(),
            snapshot.itineraries.len()
        );
        Ok(())
    }
}
