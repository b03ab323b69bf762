use super::records::{column_letter, quoted_sheet, sheet_range};
use super::{WorksheetOperations, WorksheetProvider};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::create_and_verify_authenticator;
use async_trait::async_trait;
use google_drive3::api::DriveHub;
use google_sheets4::api::{Sheet, Sheets, ValueRange};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use serde_json::Value;
use tracing::{debug, instrument};

// Spreadsheet read/write plus Drive, needed to look the spreadsheet up by name
pub(crate) const AUTH_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
    worksheet_name: String,
}

impl SheetsClient {
    /// Authenticate and open the configured spreadsheet tab
    #[instrument(name = "Opening Google Sheets worksheet", skip_all, fields(spreadsheet = %config.spreadsheet_name, worksheet = %config.worksheet_name))]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let auth = create_and_verify_authenticator(config).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| AppError::Sheets(format!("Failed to load native TLS roots: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        let sheets_hub = Sheets::new(client.clone(), auth.clone());
        let drive_hub = DriveHub::new(client, auth);

        let spreadsheet_id = Self::search_spreadsheet_by_name(&drive_hub, &config.spreadsheet_name)
            .await?
            .ok_or_else(|| {
                AppError::Sheets(format!(
                    "Spreadsheet '{}' not found",
                    config.spreadsheet_name
                ))
            })?;

        let sheet = Self::get_sheet(&sheets_hub, &spreadsheet_id, &config.worksheet_name)
            .await?
            .ok_or_else(|| {
                AppError::Sheets(format!(
                    "Worksheet '{}' not found in '{}'",
                    config.worksheet_name, config.spreadsheet_name
                ))
            })?;
        let sheet_id = sheet.properties.as_ref().and_then(|p| p.sheet_id);
        debug!(
            ?sheet_id,
            url = %format!("https://docs.google.com/spreadsheets/d/{}", spreadsheet_id),
            "Found worksheet"
        );

        Ok(Self {
            hub: sheets_hub,
            spreadsheet_id,
            worksheet_name: config.worksheet_name.clone(),
        })
    }

    #[instrument(name = "Finding spreadsheet", skip(drive))]
    async fn search_spreadsheet_by_name(
        drive: &DriveHub<HttpsConnector<HttpConnector>>,
        name: &str,
    ) -> Result<Option<String>> {
        let query = format!(
            "name='{}' and mimeType='application/vnd.google-apps.spreadsheet' and trashed=false",
            name.replace('\'', "\\'")
        );

        let (_, file_list) = drive
            .files()
            .list()
            .q(&query)
            .spaces("drive")
            .page_size(1)
            .add_scopes(AUTH_SCOPES)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to search spreadsheet: {}", e)))?;

        let spreadsheet_id = file_list
            .files
            .and_then(|files| files.into_iter().next())
            .and_then(|file| file.id);

        Ok(spreadsheet_id)
    }

    async fn get_sheet(
        sheets: &Sheets<HttpsConnector<HttpConnector>>,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Option<Sheet>> {
        let (_, spreadsheet) = sheets
            .spreadsheets()
            .get(spreadsheet_id)
            .include_grid_data(false)
            .add_scopes(AUTH_SCOPES)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to get spreadsheet: {}", e)))?;

        let sheet = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .find(|sheet| {
                sheet
                    .properties
                    .as_ref()
                    .map(|props| props.title.as_deref() == Some(sheet_name))
                    .unwrap_or(false)
            });

        Ok(sheet)
    }
}

#[async_trait]
impl WorksheetOperations for SheetsClient {
    #[instrument(name = "Fetching worksheet", skip(self))]
    async fn get_all_values(&self) -> Result<Vec<Vec<Value>>> {
        let range = sheet_range(&self.worksheet_name);
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .major_dimension("ROWS")
            .value_render_option("FORMATTED_VALUE")
            .add_scopes(AUTH_SCOPES)
            .doit()
            .await
            .map_err(|e| {
                AppError::Sheets(format!(
                    "Failed to read worksheet '{}': {}",
                    self.worksheet_name, e
                ))
            })?;

        Ok(response.values.unwrap_or_default())
    }

    #[instrument(name = "Updating cell", skip(self))]
    async fn update_cell(&self, row: usize, column: usize, value: f64) -> Result<()> {
        let range = format!(
            "{}!{}{}",
            quoted_sheet(&self.worksheet_name),
            column_letter(column),
            row
        );
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.clone()),
            values: Some(vec![vec![Value::from(value)]]),
        };

        self.hub
            .spreadsheets()
            .values_update(value_range, &self.spreadsheet_id, &range)
            .value_input_option("RAW")
            .add_scopes(AUTH_SCOPES)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to update cell {}: {}", range, e)))?;

        Ok(())
    }
}

/// Opens a [`SheetsClient`] from config on every call.
#[derive(Debug, Clone)]
pub struct GoogleWorksheetProvider {
    config: GoogleConfig,
}

impl GoogleWorksheetProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl WorksheetProvider for GoogleWorksheetProvider {
    type Worksheet = SheetsClient;

    async fn open_worksheet(&self) -> Result<SheetsClient> {
        SheetsClient::new(&self.config).await
    }
}
