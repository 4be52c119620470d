use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trip_admin_core::SeedPolicy;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the stored collections
    pub data_dir: ConfigValue<PathBuf>,
    /// How startup seeding treats existing data
    pub seed_policy: ConfigValue<SeedPolicy>,
    /// Refuse catalog commands until `auth login` has stored a token
    pub require_token: ConfigValue<bool>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    seed_policy: Option<SeedPolicy>,
    require_token: Option<bool>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut seed_policy = ConfigValue::new(SeedPolicy::default(), ConfigSource::Default);
        let mut require_token = ConfigValue::new(false, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(policy) = file_config.seed_policy {
                seed_policy = ConfigValue::new(policy, ConfigSource::File);
            }
            if let Some(required) = file_config.require_token {
                require_token = ConfigValue::new(required, ConfigSource::File);
            }
        }

        if let Ok(dir) = std::env::var("TRIP_ADMIN_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(policy) = std::env::var("TRIP_ADMIN_SEED_POLICY") {
            let parsed = policy
                .parse()
                .map_err(|e| ConfigError::InvalidValue("TRIP_ADMIN_SEED_POLICY", e))?;
            seed_policy = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(required) = std::env::var("TRIP_ADMIN_REQUIRE_TOKEN") {
            let parsed = parse_bool(&required).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "TRIP_ADMIN_REQUIRE_TOKEN",
                    format!("expected true or false, got '{}'", required),
                )
            })?;
            require_token = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            seed_policy,
            require_token,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/trip-admin/
    /// - macOS: ~/Library/Application Support/trip-admin/
    /// - Windows: %APPDATA%/trip-admin/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trip-admin")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/trip-admin/
    /// - macOS: ~/Library/Application Support/trip-admin/
    /// - Windows: %APPDATA%/trip-admin/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trip-admin")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, e) => {
                write!(f, "Invalid value for {}: {}", name, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
