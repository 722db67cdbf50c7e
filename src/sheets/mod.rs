mod client;
mod requests;

pub use client::SheetsClient;
pub use requests::{BorderStyle, GridRect};

// Re-export clear_tokens for CLI usage
pub use client::clear_tokens as clear_sheets_tokens;

use crate::error::Result;
use crate::table::Table;
use async_trait::async_trait;

#[async_trait]
pub trait SheetOperations {
    /// Append rows after existing content in the target range.
    async fn append(&self, data: &Table, spreadsheet_id: &str, target: &str) -> Result<()>;

    /// Fetch a rectangular range, applying optional column labels.
    async fn read(
        &self,
        spreadsheet_id: &str,
        range: &str,
        labels: Option<Vec<String>>,
    ) -> Result<Table>;

    /// Overwrite cell values in place starting at the target range.
    async fn update(&self, data: &Table, spreadsheet_id: &str, target: &str) -> Result<()>;

    /// Empty all cell values in the range without altering formatting.
    async fn clear(&self, spreadsheet_id: &str, range: &str) -> Result<()>;

    /// Toggle bold over a rectangle of zero-based half-open indices.
    async fn set_bold(&self, spreadsheet_id: &str, rect: &GridRect, bold: bool) -> Result<()>;

    /// Draw outer and inner borders over a rectangle of one-based bounds.
    async fn set_borders(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        rect: &GridRect,
        style: BorderStyle,
        inner: BorderStyle,
    ) -> Result<()>;

    /// Append `count` two-column blank rows, shifting existing rows down.
    async fn insert_blank_rows(
        &self,
        count: usize,
        spreadsheet_id: &str,
        target: &str,
    ) -> Result<()>;

    /// Remove whole rows given with one-based bounds, shifting later rows up.
    async fn delete_rows(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        start_row: i32,
        end_row: i32,
    ) -> Result<()>;
}

#[cfg(test)]
mod mocks {
    use super::*;
    use crate::error::AppError;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};

    /// In-memory stand-in for the remote value store.
    #[derive(Clone, Default)]
    pub(crate) struct StubSheetsClient {
        pub cells: Arc<Mutex<Vec<Vec<Value>>>>,
    }

    #[async_trait]
    impl SheetOperations for StubSheetsClient {
        async fn append(&self, data: &Table, _spreadsheet_id: &str, _target: &str) -> Result<()> {
            self.cells
                .lock()
                .unwrap()
                .extend(data.rows().iter().cloned());
            Ok(())
        }

        async fn read(
            &self,
            _spreadsheet_id: &str,
            _range: &str,
            labels: Option<Vec<String>>,
        ) -> Result<Table> {
            let cells = self.cells.lock().unwrap().clone();
            Table::from_values(cells, labels)
        }

        async fn update(&self, data: &Table, _spreadsheet_id: &str, _target: &str) -> Result<()> {
            *self.cells.lock().unwrap() = data.rows().to_vec();
            Ok(())
        }

        async fn clear(&self, _spreadsheet_id: &str, _range: &str) -> Result<()> {
            self.cells.lock().unwrap().clear();
            Ok(())
        }

        async fn set_bold(
            &self,
            _spreadsheet_id: &str,
            _rect: &GridRect,
            _bold: bool,
        ) -> Result<()> {
            Ok(())
        }

        async fn set_borders(
            &self,
            _spreadsheet_id: &str,
            _sheet_id: i32,
            _rect: &GridRect,
            _style: BorderStyle,
            _inner: BorderStyle,
        ) -> Result<()> {
            Ok(())
        }

        async fn insert_blank_rows(
            &self,
            count: usize,
            spreadsheet_id: &str,
            target: &str,
        ) -> Result<()> {
            let blanks = Table::blank(count, 2);
            self.append(&blanks, spreadsheet_id, target).await
        }

        async fn delete_rows(
            &self,
            _spreadsheet_id: &str,
            _sheet_id: i32,
            start_row: i32,
            end_row: i32,
        ) -> Result<()> {
            let mut cells = self.cells.lock().unwrap();
            let end = ((end_row - 1).max(0) as usize).min(cells.len());
            let start = ((start_row - 1).max(0) as usize).min(end);
            cells.drain(start..end);
            Ok(())
        }
    }

    /// Transport that fails every call, counting how often it was invoked.
    #[derive(Clone, Default)]
    pub(crate) struct FailingSheetsClient {
        pub calls: Arc<Mutex<usize>>,
    }

    impl FailingSheetsClient {
        fn fail(&self) -> AppError {
            *self.calls.lock().unwrap() += 1;
            AppError::Sheets("transport failure".to_string())
        }
    }

    #[async_trait]
    impl SheetOperations for FailingSheetsClient {
        async fn append(&self, _data: &Table, _spreadsheet_id: &str, _target: &str) -> Result<()> {
            Err(self.fail())
        }

        async fn read(
            &self,
            _spreadsheet_id: &str,
            _range: &str,
            _labels: Option<Vec<String>>,
        ) -> Result<Table> {
            Err(self.fail())
        }

        async fn update(&self, _data: &Table, _spreadsheet_id: &str, _target: &str) -> Result<()> {
            Err(self.fail())
        }

        async fn clear(&self, _spreadsheet_id: &str, _range: &str) -> Result<()> {
            Err(self.fail())
        }

        async fn set_bold(
            &self,
            _spreadsheet_id: &str,
            _rect: &GridRect,
            _bold: bool,
        ) -> Result<()> {
            Err(self.fail())
        }

        async fn set_borders(
            &self,
            _spreadsheet_id: &str,
            _sheet_id: i32,
            _rect: &GridRect,
            _style: BorderStyle,
            _inner: BorderStyle,
        ) -> Result<()> {
            Err(self.fail())
        }

        async fn insert_blank_rows(
            &self,
            _count: usize,
            _spreadsheet_id: &str,
            _target: &str,
        ) -> Result<()> {
            Err(self.fail())
        }

        async fn delete_rows(
            &self,
            _spreadsheet_id: &str,
            _sheet_id: i32,
            _start_row: i32,
            _end_row: i32,
        ) -> Result<()> {
            Err(self.fail())
        }
    }
}
