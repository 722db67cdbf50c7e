use crate::error::{AppError, Result};
use google_sheets4::api::ValueRange;
use serde_json::Value;

/// Rows of cell values exchanged with the spreadsheet API.
///
/// Rows need not have uniform length; the column count is the widest row.
/// Column labels are optional and applied by the caller after retrieval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Value>>,
    labels: Option<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        Self { rows, labels: None }
    }

    /// Build a table from string cells.
    pub fn from_strings(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Value::String).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// Build a table from a fetched value grid, applying optional labels.
    ///
    /// An empty grid yields an empty table, not an error.
    pub fn from_values(values: Vec<Vec<Value>>, labels: Option<Vec<String>>) -> Result<Self> {
        let mut table = Self::from_rows(values);
        if let Some(labels) = labels {
            table.set_labels(labels)?;
        }
        Ok(table)
    }

    /// `count` rows of `width` empty-string cells.
    pub fn blank(count: usize, width: usize) -> Self {
        let row: Vec<Value> = vec![Value::String(String::new()); width];
        Self::from_rows(vec![row; count])
    }

    /// Assign column labels, failing if the length does not match the column count.
    pub fn set_labels(&mut self, labels: Vec<String>) -> Result<()> {
        let columns = self.column_count();
        if labels.len() != columns {
            return Err(AppError::ShapeMismatch {
                labels: labels.len(),
                columns,
            });
        }
        self.labels = Some(labels);
        Ok(())
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read raw rows from CSV. Every field becomes a string cell.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| Value::String(field.to_string()))
                    .collect(),
            );
        }

        Ok(Self::from_rows(rows))
    }

    /// Write the table as CSV, labels first when present.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if let Some(labels) = &self.labels {
            csv_writer.write_record(labels)?;
        }
        for row in &self.rows {
            let record: Vec<String> = row.iter().map(cell_to_string).collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    pub(crate) fn to_value_range(&self, range: &str) -> ValueRange {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.to_string()),
            values: Some(self.rows.clone()),
        }
    }
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_values_give_empty_table() {
        let table = Table::from_values(Vec::new(), None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_label_mismatch() {
        let values = vec![vec![json!("a"), json!("b")]];
        let err = Table::from_values(values, Some(vec!["only".to_string()])).unwrap_err();
        match err {
            AppError::ShapeMismatch { labels, columns } => {
                assert_eq!(labels, 1);
                assert_eq!(columns, 2);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_labels_on_empty_table_mismatch() {
        let err = Table::from_values(Vec::new(), Some(vec!["a".to_string()])).unwrap_err();
        assert!(matches!(
            err,
            AppError::ShapeMismatch {
                labels: 1,
                columns: 0
            }
        ));
    }

    #[test]
    fn test_matching_labels() {
        let values = vec![vec![json!("a"), json!("b")]];
        let labels = vec!["first".to_string(), "second".to_string()];
        let table = Table::from_values(values, Some(labels.clone())).unwrap();
        assert_eq!(table.labels(), Some(labels.as_slice()));
    }

    #[test]
    fn test_column_count_is_widest_row() {
        let table = Table::from_rows(vec![
            vec![json!("a")],
            vec![json!("b"), json!("c"), json!("d")],
            vec![json!("e"), json!("f")],
        ]);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_blank_rows_payload() {
        let table = Table::blank(3, 2);
        assert_eq!(table.row_count(), 3);
        for row in table.rows() {
            assert_eq!(row, &vec![json!(""), json!("")]);
        }
    }

    #[test]
    fn test_csv_round_trip() {
        let input = "a,b,c\n1,2,3\n";
        let table = Table::from_csv_reader(input.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1], vec![json!("1"), json!("2"), json!("3")]);

        let mut output = Vec::new();
        table.write_csv(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), input);
    }

    #[test]
    fn test_csv_ragged_rows() {
        let input = "a,b\nc\n";
        let table = Table::from_csv_reader(input.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.rows()[1].len(), 1);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_to_value_range() {
        let table = Table::from_strings(vec![vec!["x".to_string()]]);
        let value_range = table.to_value_range("Sheet1!A2");
        assert_eq!(value_range.range.as_deref(), Some("Sheet1!A2"));
        assert_eq!(value_range.major_dimension.as_deref(), Some("ROWS"));
        assert_eq!(value_range.values.unwrap(), vec![vec![json!("x")]]);
    }
}
