mod auth;
mod client;
pub mod records;

pub use client::GoogleWorksheetProvider;

use crate::error::Result;
use crate::models::RowRecord;
use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

/// Authenticated access to a single worksheet tab.
#[async_trait]
pub trait WorksheetOperations: Send + Sync {
    /// All non-empty rows of the tab, header row included.
    async fn get_all_values(&self) -> Result<Vec<Vec<Value>>>;

    /// Overwrite one cell, addressed by 1-based row and column.
    async fn update_cell(&self, row: usize, column: usize, value: f64) -> Result<()>;

    async fn get_all_records(&self) -> Result<Vec<RowRecord>> {
        let values = self.get_all_values().await?;
        Ok(records::records_from_values(&values))
    }
}

/// Opens a fresh worksheet handle for each operation.
#[async_trait]
pub trait WorksheetProvider: Send + Sync {
    type Worksheet: WorksheetOperations;

    async fn open_worksheet(&self) -> Result<Self::Worksheet>;
}

/// Open the worksheet, or log the failure and return `None`.
pub async fn get_worksheet<P: WorksheetProvider>(provider: &P) -> Option<P::Worksheet> {
    match provider.open_worksheet().await {
        Ok(worksheet) => Some(worksheet),
        Err(e) => {
            error!(error = %e, "Failed to open worksheet");
            None
        }
    }
}

/// Fetch every row as a record; any failure yields an empty list.
pub async fn fetch_all_rows<P: WorksheetProvider>(provider: &P) -> Vec<RowRecord> {
    let Some(worksheet) = get_worksheet(provider).await else {
        return Vec::new();
    };

    match worksheet.get_all_records().await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Failed to fetch worksheet rows");
            Vec::new()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::{MockProvider, MockWorksheet};
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_worksheet_failure_is_none() {
        let provider = MockProvider::default();
        assert!(get_worksheet(&provider).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_rows() {
        let worksheet = MockWorksheet::with_values(vec![
            vec![json!("Telegram ID"), json!("Balance")],
            vec![json!("111"), json!("10")],
        ]);
        let provider = MockProvider {
            worksheet: Some(worksheet),
        };

        let rows = fetch_all_rows(&provider).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Telegram ID"], json!("111"));
    }

    #[tokio::test]
    async fn test_fetch_all_rows_without_worksheet_is_empty() {
        let provider = MockProvider::default();
        assert!(fetch_all_rows(&provider).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_rows_read_error_is_empty() {
        let worksheet = MockWorksheet {
            fail_reads: true,
            ..MockWorksheet::with_values(vec![vec![json!("Telegram ID")]])
        };
        let provider = MockProvider {
            worksheet: Some(worksheet),
        };

        assert!(fetch_all_rows(&provider).await.is_empty());
    }
}
