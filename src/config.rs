use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "balance-sheet-sync";

const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
const DEFAULT_SPREADSHEET_NAME: &str = "tushlik";
const DEFAULT_WORKSHEET_NAME: &str = "Sheet1";
const DEFAULT_DATABASE_FILE: &str = "balances.db";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub google: GoogleConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GoogleConfig {
    /// Service account key file
    pub credentials_file: PathBuf,
    pub spreadsheet_name: String,
    pub worksheet_name: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            spreadsheet_name: DEFAULT_SPREADSHEET_NAME.to_string(),
            worksheet_name: DEFAULT_WORKSHEET_NAME.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. Defaults to a file in the XDG data directory.
    pub database_file: Option<PathBuf>,
}

impl Config {
    /// Load the config file, falling back to defaults when it doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        if config.google.spreadsheet_name.is_empty() || config.google.worksheet_name.is_empty() {
            return Err(AppError::Config(
                "Google spreadsheet_name and worksheet_name must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_data_home()
            .ok_or_else(|| AppError::Config("Failed to determine data directory".to_string()))
    }

    /// Resolve the balance database path, creating its parent directory
    pub fn database_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store.database_file {
            return Ok(path.clone());
        }

        let xdg = Self::xdg_dirs();
        xdg.place_data_file(DEFAULT_DATABASE_FILE)
            .map_err(|e| AppError::Config(format!("Failed to create data file path: {}", e)))
    }
}
