mod push;
mod show;
mod sync;
mod users;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use show::ShowResource;
pub use users::UsersAction;

#[derive(Parser, Debug)]
#[command(name = "balance-sheet-sync")]
#[command(about = "Sync user balances between Google Sheets and the local store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Sync => sync::execute().await,
            Commands::Push {
                telegram_id,
                balance,
            } => push::execute(*telegram_id, *balance).await,
            Commands::Users { action } => action.execute().await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull balances from the worksheet into the store
    Sync,
    /// Write one user's balance to the worksheet
    Push {
        telegram_id: i64,
        /// Balance to write. Defaults to the balance held in the store.
        #[arg(long, allow_negative_numbers = true)]
        balance: Option<f64>,
    },
    /// Manage users in the store
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}
