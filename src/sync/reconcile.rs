use crate::error::Result;
use crate::models::{RowRecord, UserBalance};
use crate::store::BalanceStore;

/// What happened to a single worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// No usable identifier; not counted either way.
    Skipped,
    Updated(UserBalance),
    /// The store reported no modification (unknown user or same balance).
    NotUpdated(UserBalance),
}

/// Running totals for a reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncTally {
    pub updated: usize,
    pub errors: usize,
}

impl SyncTally {
    pub fn record(&mut self, outcome: &Result<RowOutcome>) {
        match outcome {
            Ok(RowOutcome::Skipped) => {}
            Ok(RowOutcome::Updated(_)) => self.updated += 1,
            Ok(RowOutcome::NotUpdated(_)) | Err(_) => self.errors += 1,
        }
    }
}

/// Apply one worksheet row to the store.
pub async fn apply_record<S>(record: &RowRecord, store: &S) -> Result<RowOutcome>
where
    S: BalanceStore + ?Sized,
{
    let Some(entry) = UserBalance::from_record(record) else {
        return Ok(RowOutcome::Skipped);
    };

    if store.set_balance(entry.telegram_id, entry.balance).await? {
        Ok(RowOutcome::Updated(entry))
    } else {
        Ok(RowOutcome::NotUpdated(entry))
    }
}
