use super::BalanceStore;
use crate::blocking::run_blocking_on;
use crate::error::{AppError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::{debug, instrument};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    telegram_id INTEGER PRIMARY KEY,
    name        TEXT NOT NULL DEFAULT '',
    balance     REAL NOT NULL DEFAULT 0
);
";

/// Balances in a SQLite `users` table.
///
/// Queries run on the blocking pool of the runtime the store was opened on.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    runtime: Handle,
}

impl SqliteStore {
    #[instrument(name = "Opening balance store", skip_all, fields(path = ?path))]
    pub async fn open(path: PathBuf) -> Result<Self> {
        let runtime = Handle::current();
        let conn = run_blocking_on(&runtime, move || Ok(Connection::open(&path)?)).await?;
        Self::from_connection(conn, runtime)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, Handle::current())
    }

    fn from_connection(conn: Connection, runtime: Handle) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            runtime,
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        run_blocking_on(&self.runtime, move || {
            let conn = conn
                .lock()
                .map_err(|_| AppError::Other(anyhow!("balance store connection poisoned")))?;
            f(&conn)
        })
        .await
    }
}

#[async_trait]
impl BalanceStore for SqliteStore {
    async fn get_balance(&self, telegram_id: i64) -> Result<Option<f64>> {
        self.with_connection(move |conn| {
            let balance = conn
                .query_row(
                    "SELECT balance FROM users WHERE telegram_id = ?1",
                    params![telegram_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(balance)
        })
        .await
    }

    async fn set_balance(&self, telegram_id: i64, balance: f64) -> Result<bool> {
        let changed = self
            .with_connection(move |conn| {
                let changed = conn.execute(
                    "UPDATE users SET balance = ?1 WHERE telegram_id = ?2 AND balance IS NOT ?1",
                    params![balance, telegram_id],
                )?;
                Ok(changed)
            })
            .await?;

        debug!(telegram_id, balance, changed, "Set balance");
        Ok(changed > 0)
    }

    async fn ensure_user(&self, telegram_id: i64, name: &str) -> Result<bool> {
        let name = name.to_string();
        let inserted = self
            .with_connection(move |conn| {
                let inserted = conn.execute(
                    "INSERT OR IGNORE INTO users (telegram_id, name) VALUES (?1, ?2)",
                    params![telegram_id, name],
                )?;
                Ok(inserted)
            })
            .await?;

        Ok(inserted > 0)
    }
}
