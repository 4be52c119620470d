use clap::Args;
use trip_admin_core::{InitReport, SeedPolicy, Storage};

#[derive(Args)]
pub struct InitCommand {
    /// Overwrite both collections with the seed data
    #[arg(long)]
    pub reset: bool,
}

impl InitCommand {
    pub fn policy(&self, configured: SeedPolicy) -> SeedPolicy {
        if self.reset {
            SeedPolicy::Always
        } else {
            configured
        }
    }

    pub fn run(
        &self,
        storage: &Storage,
        configured: SeedPolicy,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let report = storage.initialize(self.policy(configured))?;
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &InitReport) {
    if report.sentinel_restored {
        println!("Restored \"Unknown Category\"");
    } else if report.categories_written {
        println!("Seeded categories");
    }
    if report.itineraries_written {
        println!("Seeded itineraries");
    }
    if !report.categories_written && !report.itineraries_written {
        println!("Storage already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_admin_core::NewCategory;

    #[test]
    fn test_reset_overrides_configured_policy() {
        assert_eq!(
            InitCommand { reset: true }.policy(SeedPolicy::IfAbsent),
            SeedPolicy::Always
        );
        assert_eq!(
            InitCommand { reset: false }.policy(SeedPolicy::IfAbsent),
            SeedPolicy::IfAbsent
        );
    }

    #[test]
    fn test_reset_discards_changes() {
        let storage = Storage::in_memory();
        storage.initialize(SeedPolicy::IfAbsent).unwrap();
        storage.categories().add(NewCategory::new("Safari")).unwrap();

        InitCommand { reset: false }
            .run(&storage, SeedPolicy::IfAbsent)
            .unwrap();
        assert_eq!(storage.categories().list().unwrap().len(), 7);

        InitCommand { reset: true }
            .run(&storage, SeedPolicy::IfAbsent)
            .unwrap();
        assert_eq!(storage.categories().list().unwrap().len(), 6);
    }
}
