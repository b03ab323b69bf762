use super::sync::open_engine;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::store::{BalanceStore, SqliteStore};
use anyhow::anyhow;
use tracing::info;

pub async fn execute(telegram_id: i64, balance: Option<f64>) -> Result<()> {
    let config = Config::load()?;

    let balance = match balance {
        Some(balance) => balance,
        None => stored_balance(&config, telegram_id).await?,
    };

    let engine = open_engine(&config).await?;
    if !engine.update_user_balance_in_sheet(telegram_id, balance).await {
        return Err(AppError::Other(anyhow!(
            "Balance for {} was not written to the sheet",
            telegram_id
        )));
    }

    info!(telegram_id, balance, "Balance pushed");

    Ok(())
}

async fn stored_balance(config: &Config, telegram_id: i64) -> Result<f64> {
    let store = SqliteStore::open(config.database_file()?).await?;
    store
        .get_balance(telegram_id)
        .await?
        .ok_or_else(|| AppError::Other(anyhow!("User {} not found in store", telegram_id)))
}
