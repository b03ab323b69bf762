use crate::error::{AppError, Result};
use crate::models::SyncResult;
use crate::sheets::records::{locate_balance_cell, records_from_values};
use crate::sheets::{WorksheetOperations, WorksheetProvider, get_worksheet};
use crate::store::BalanceStore;
use crate::sync::reconcile::{RowOutcome, SyncTally, apply_record};
use indicatif::ProgressStyle;
use tracing::{Span, debug, error, info, instrument, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const NO_WORKSHEET: &str = "Failed to get worksheet";

pub struct SyncEngine<WP, BS> {
    worksheets: WP,
    store: BS,
}

impl<WP, BS> SyncEngine<WP, BS>
where
    WP: WorksheetProvider,
    BS: BalanceStore,
{
    pub fn new(worksheets: WP, store: BS) -> Self {
        Self { worksheets, store }
    }

    /// Write one user's balance into the worksheet.
    ///
    /// Returns `false` when the worksheet can't be opened, the user has no
    /// row, or the write fails.
    #[instrument(name = "Pushing balance", skip(self))]
    pub async fn update_user_balance_in_sheet(&self, telegram_id: i64, new_balance: f64) -> bool {
        let Some(worksheet) = get_worksheet(&self.worksheets).await else {
            return false;
        };

        match Self::write_balance(&worksheet, telegram_id, new_balance).await {
            Ok(true) => {
                info!("Balance written to sheet");
                true
            }
            Ok(false) => {
                warn!("User not found in sheet");
                false
            }
            Err(e) => {
                error!(error = %e, "Failed to update balance in sheet");
                false
            }
        }
    }

    async fn write_balance(
        worksheet: &WP::Worksheet,
        telegram_id: i64,
        new_balance: f64,
    ) -> Result<bool> {
        let values = worksheet.get_all_values().await?;

        let Some((row, column)) = locate_balance_cell(&values, telegram_id) else {
            return Ok(false);
        };

        worksheet.update_cell(row, column, new_balance).await?;
        Ok(true)
    }

    /// Pull every worksheet row into the store.
    ///
    /// Never fails: an unreachable worksheet yields an unsuccessful result and
    /// a bad row only bumps the error count.
    #[instrument(name = "Sync", skip_all)]
    pub async fn sync_balances_from_sheet(&self) -> SyncResult {
        let Some(worksheet) = get_worksheet(&self.worksheets).await else {
            return SyncResult::failed(NO_WORKSHEET);
        };

        match self.reconcile(&worksheet).await {
            Ok(tally) => {
                info!(
                    updated = tally.updated,
                    errors = tally.errors,
                    "Balances synced from sheet"
                );
                SyncResult::completed(tally.updated, tally.errors)
            }
            Err(e) => {
                error!(error = %e, "Balance sync failed");
                SyncResult::failed(e.to_string())
            }
        }
    }

    async fn reconcile(&self, worksheet: &WP::Worksheet) -> Result<SyncTally> {
        let values = worksheet.get_all_values().await?;
        let records = records_from_values(&values);

        let span = Span::current();
        span.pb_set_style(
            &ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )
            .map_err(|e| AppError::Other(e.into()))?,
        );
        span.pb_set_message("Syncing balances");
        span.pb_set_length(records.len() as u64);

        let mut tally = SyncTally::default();
        for (idx, record) in records.iter().enumerate() {
            // Header is row 1
            let row = idx + 2;
            let outcome = apply_record(record, &self.store).await;
            match &outcome {
                Ok(RowOutcome::Skipped) => debug!(row, "Skipped row without a Telegram ID"),
                Ok(RowOutcome::Updated(entry)) => debug!(
                    row,
                    telegram_id = entry.telegram_id,
                    balance = entry.balance,
                    "Balance updated"
                ),
                Ok(RowOutcome::NotUpdated(entry)) => warn!(
                    row,
                    telegram_id = entry.telegram_id,
                    "User not found in store or balance unchanged"
                ),
                Err(e) => error!(row, error = %e, "Failed to sync row"),
            }
            tally.record(&outcome);
            span.pb_inc(1);
        }

        Ok(tally)
    }
}

#[cfg(test)]
mod mocks {
    use super::*;
    use crate::sheets::mocks::{MockProvider, MockWorksheet};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    pub(crate) fn engine_against_mocks(
        values: Option<Vec<Vec<Value>>>,
        store: MockStore,
    ) -> (SyncEngine<MockProvider, MockStore>, Option<MockWorksheet>) {
        let worksheet = values.map(MockWorksheet::with_values);
        let provider = MockProvider {
            worksheet: worksheet.clone(),
        };
        (SyncEngine::new(provider, store), worksheet)
    }

    /// Map-backed store that records every call and can fail per user.
    #[derive(Clone, Default)]
    pub(crate) struct MockStore {
        pub balances: Arc<Mutex<HashMap<i64, f64>>>,
        pub calls: Arc<Mutex<Vec<(i64, f64)>>>,
        pub failing_ids: Vec<i64>,
    }

    impl MockStore {
        pub(crate) fn with_balances(balances: &[(i64, f64)]) -> Self {
            Self {
                balances: Arc::new(Mutex::new(balances.iter().copied().collect())),
                ..Default::default()
            }
        }

        pub(crate) fn balance(&self, telegram_id: i64) -> Option<f64> {
            self.balances.lock().unwrap().get(&telegram_id).copied()
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BalanceStore for MockStore {
        async fn get_balance(&self, telegram_id: i64) -> Result<Option<f64>> {
            Ok(self.balance(telegram_id))
        }

        async fn set_balance(&self, telegram_id: i64, balance: f64) -> Result<bool> {
            self.calls.lock().unwrap().push((telegram_id, balance));
            if self.failing_ids.contains(&telegram_id) {
                return Err(AppError::Other(anyhow::anyhow!("store unavailable")));
            }

            let mut balances = self.balances.lock().unwrap();
            match balances.get_mut(&telegram_id) {
                Some(current) if *current != balance => {
                    *current = balance;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn ensure_user(&self, telegram_id: i64, _name: &str) -> Result<bool> {
            let mut balances = self.balances.lock().unwrap();
            if balances.contains_key(&telegram_id) {
                return Ok(false);
            }
            balances.insert(telegram_id, 0.0);
            Ok(true)
        }
    }
}
