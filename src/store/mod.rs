mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use async_trait::async_trait;

/// Persistent per-user balances keyed by Telegram ID.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    async fn get_balance(&self, telegram_id: i64) -> Result<Option<f64>>;

    /// Set the balance of an existing user.
    ///
    /// Returns whether the entry was modified: `false` when the user doesn't
    /// exist or already holds this balance.
    async fn set_balance(&self, telegram_id: i64, balance: f64) -> Result<bool>;

    /// Register a user with a zero balance. Returns `false` if already present.
    async fn ensure_user(&self, telegram_id: i64, name: &str) -> Result<bool>;
}
