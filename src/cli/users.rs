use crate::config::Config;
use crate::error::Result;
use crate::store::{BalanceStore, SqliteStore};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// Register a user with a zero balance
    Add {
        telegram_id: i64,
        #[arg(long, default_value = "")]
        name: String,
    },
}

impl UsersAction {
    pub async fn execute(&self) -> Result<()> {
        match self {
            UsersAction::Add { telegram_id, name } => add_user(*telegram_id, name).await,
        }
    }
}

async fn add_user(telegram_id: i64, name: &str) -> Result<()> {
    let config = Config::load()?;
    let store = SqliteStore::open(config.database_file()?).await?;

    if store.ensure_user(telegram_id, name).await? {
        info!(telegram_id, "User added");
    } else {
        info!(telegram_id, "User already exists");
    }

    Ok(())
}
