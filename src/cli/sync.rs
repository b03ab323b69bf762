use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sheets::GoogleWorksheetProvider;
use crate::store::SqliteStore;
use crate::sync::SyncEngine;
use anyhow::anyhow;

pub(super) async fn open_engine(
    config: &Config,
) -> Result<SyncEngine<GoogleWorksheetProvider, SqliteStore>> {
    let store = SqliteStore::open(config.database_file()?).await?;
    let worksheets = GoogleWorksheetProvider::new(config.google.clone());

    Ok(SyncEngine::new(worksheets, store))
}

pub async fn execute() -> Result<()> {
    let config = Config::load()?;
    let engine = open_engine(&config).await?;

    let result = engine.sync_balances_from_sheet().await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        return Err(AppError::Other(anyhow!(
            "Sync failed: {}",
            result.error.unwrap_or_default()
        )));
    }

    Ok(())
}
