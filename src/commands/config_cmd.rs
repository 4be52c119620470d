use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

const DEFAULT_CONFIG: &str = "\
# Trip Admin configuration

# Directory holding adminCategories, adminItineraries and adminToken.
# Relative paths resolve against this file's directory.
# data_dir: ~/.local/share/trip-admin

# if-absent: seed missing collections only
# always: overwrite both collections with the seed data on every start
seed_policy: if-absent

# Refuse catalog commands until `trip-admin auth login` has stored a token
require_token: false
";

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, short)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("seed_policy: {}", config.seed_policy.value);
                        println!("  source: {}", config.seed_policy.source);
                        println!();

                        println!("require_token: {}", config.require_token.value);
                        println!("  source: {}", config.require_token.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init { force } => {
                let path = config_path.unwrap_or_else(Config::default_config_path);
                write_default_config(&path, *force)?;
                println!("Wrote config file: {}", path.display());
                Ok(())
            }
        }
    }
}

fn write_default_config(path: &std::path::Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;
    use trip_admin_core::SeedPolicy;

    #[test]
    fn test_default_config_loads() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        write_default_config(&path, false).unwrap();

        let config = Config::load(Some(path.clone())).unwrap();
        assert_eq!(config.config_file, Some(path));
        assert_eq!(config.seed_policy.value, SeedPolicy::IfAbsent);
        assert_eq!(config.seed_policy.source, ConfigSource::File);
        assert!(!config.require_token.value);
        assert_eq!(config.data_dir.source, ConfigSource::Default);
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "require_token: true\n").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "require_token: true\n"
        );

        write_default_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
