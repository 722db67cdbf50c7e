use super::SheetOperations;
use super::requests::{self, BorderStyle, GridRect};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::session::SessionProvider;
use crate::table::Table;
use async_trait::async_trait;
use google_sheets4::api::{
    BatchUpdateSpreadsheetRequest, ClearValuesRequest, Request, Scope, Sheets,
};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::instrument;

// Full read/write access to the user's spreadsheets.
pub(crate) const AUTH_SCOPE: Scope = Scope::Spreadsheet;

const TOKEN_CACHE_FILE: &str = "sheets_tokens.json";

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        let session =
            SessionProvider::connect(config, AUTH_SCOPE.as_ref(), TOKEN_CACHE_FILE).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .unwrap()
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        let hub = Sheets::new(client, session.authenticator());

        Ok(Self { hub })
    }

    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        requests: Vec<Request>,
        context: &str,
    ) -> Result<()> {
        let batch = BatchUpdateSpreadsheetRequest {
            requests: Some(requests),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(batch, spreadsheet_id)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to {}: {}", context, e)))?;

        Ok(())
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Appending rows", skip(self, data))]
    async fn append(&self, data: &Table, spreadsheet_id: &str, target: &str) -> Result<()> {
        let value_range = data.to_value_range(target);

        self.hub
            .spreadsheets()
            .values_append(value_range, spreadsheet_id, target)
            .value_input_option("USER_ENTERED")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to append values: {}", e)))?;

        Ok(())
    }

    #[instrument(name = "Reading range", skip(self, labels))]
    async fn read(
        &self,
        spreadsheet_id: &str,
        range: &str,
        labels: Option<Vec<String>>,
    ) -> Result<Table> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read range '{}': {}", range, e)))?;

        Table::from_values(response.values.unwrap_or_default(), labels)
    }

    #[instrument(name = "Updating range", skip(self, data))]
    async fn update(&self, data: &Table, spreadsheet_id: &str, target: &str) -> Result<()> {
        let value_range = data.to_value_range(target);

        self.hub
            .spreadsheets()
            .values_update(value_range, spreadsheet_id, target)
            .value_input_option("USER_ENTERED")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to update values: {}", e)))?;

        Ok(())
    }

    #[instrument(name = "Clearing range", skip(self))]
    async fn clear(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        self.hub
            .spreadsheets()
            .values_clear(ClearValuesRequest::default(), spreadsheet_id, range)
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to clear range '{}': {}", range, e)))?;

        Ok(())
    }

    #[instrument(name = "Setting bold", skip(self))]
    async fn set_bold(&self, spreadsheet_id: &str, rect: &GridRect, bold: bool) -> Result<()> {
        self.batch_update(
            spreadsheet_id,
            vec![requests::bold_request(rect, bold)],
            "set bold formatting",
        )
        .await
    }

    #[instrument(name = "Setting borders", skip(self))]
    async fn set_borders(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        rect: &GridRect,
        style: BorderStyle,
        inner: BorderStyle,
    ) -> Result<()> {
        self.batch_update(
            spreadsheet_id,
            vec![requests::borders_request(sheet_id, rect, style, inner)],
            "set borders",
        )
        .await
    }

    #[instrument(name = "Inserting blank rows", skip(self))]
    async fn insert_blank_rows(
        &self,
        count: usize,
        spreadsheet_id: &str,
        target: &str,
    ) -> Result<()> {
        let data = Table::blank(count, 2);
        let value_range = data.to_value_range(target);

        self.hub
            .spreadsheets()
            .values_append(value_range, spreadsheet_id, target)
            .value_input_option("USER_ENTERED")
            .insert_data_option("INSERT_ROWS")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to insert blank rows: {}", e)))?;

        Ok(())
    }

    #[instrument(name = "Deleting rows", skip(self))]
    async fn delete_rows(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        start_row: i32,
        end_row: i32,
    ) -> Result<()> {
        self.batch_update(
            spreadsheet_id,
            vec![requests::delete_rows_request(sheet_id, start_row, end_row)],
            "delete rows",
        )
        .await
    }
}

/// Clear cached Google Sheets tokens
pub fn clear_tokens() -> Result<()> {
    crate::session::clear_tokens(TOKEN_CACHE_FILE)
}
