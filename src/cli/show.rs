use crate::config::Config;
use crate::error::Result;
use crate::sheets::{GoogleWorksheetProvider, fetch_all_rows};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration and data paths
    Paths,
    /// Show every worksheet row as read by a sync
    Rows,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
            ShowResource::Rows => show_rows().await,
        }
    }
}

fn show_paths() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_file()?;
    let data_dir = Config::data_dir()?;
    let database_file = config.database_file()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?data_dir, "Data path");
    info!(path = ?database_file, "Database path");
    info!(path = ?config.google.credentials_file, "Credentials path");

    Ok(())
}

async fn show_rows() -> Result<()> {
    let config = Config::load()?;
    let provider = GoogleWorksheetProvider::new(config.google);

    let rows = fetch_all_rows(&provider).await;
    for (idx, row) in rows.iter().enumerate() {
        info!(row = idx + 2, record = %serde_json::Value::Object(row.clone()), "Row");
    }
    info!(count = rows.len(), "Rows fetched");

    Ok(())
}
