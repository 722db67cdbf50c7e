use crate::config::Config;
use crate::error::Result;
use crate::sheets::{BorderStyle, GridRect, SheetOperations, SheetsClient};
use crate::table::Table;
use clap::Subcommand;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum SheetCommand {
    /// Append CSV rows after existing content
    Append {
        spreadsheet_id: String,

        /// CSV file to read rows from
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, default_value = "A2")]
        target: String,
    },
    /// Read a range and print it as CSV
    Read {
        spreadsheet_id: String,
        range: String,

        /// Column labels to apply, comma separated
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,
    },
    /// Overwrite cell values starting at the target
    Update {
        spreadsheet_id: String,

        /// CSV file to read rows from
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, default_value = "A2")]
        target: String,
    },
    /// Empty all cell values in a range
    Clear {
        spreadsheet_id: String,
        range: String,
    },
    /// Toggle bold over a rectangle of zero-based half-open bounds
    Bold {
        spreadsheet_id: String,

        /// Row bounds as start:end
        #[arg(long, value_parser = parse_span, default_value = "0:1")]
        rows: (i32, i32),

        /// Column bounds as start:end
        #[arg(long, value_parser = parse_span, default_value = "0:1")]
        cols: (i32, i32),

        /// Remove bold instead of applying it
        #[arg(long)]
        off: bool,
    },
    /// Draw borders over a rectangle of one-based bounds
    Borders {
        spreadsheet_id: String,

        /// Numeric id of the tab within the spreadsheet
        #[arg(long)]
        sheet: i32,

        /// Row bounds as start:end
        #[arg(long, value_parser = parse_span, default_value = "1:2")]
        rows: (i32, i32),

        /// Column bounds as start:end
        #[arg(long, value_parser = parse_span, default_value = "1:2")]
        cols: (i32, i32),

        /// Outer border style
        #[arg(long, default_value = "SOLID_MEDIUM")]
        style: BorderStyle,

        /// Inner border style
        #[arg(long, default_value = "NONE")]
        inner: BorderStyle,
    },
    /// Append blank rows, shifting existing rows down
    Insert {
        spreadsheet_id: String,
        count: usize,
        target: String,
    },
    /// Delete whole rows given one-based bounds
    DeleteRows {
        spreadsheet_id: String,

        /// Numeric id of the tab within the spreadsheet
        #[arg(long)]
        sheet: i32,

        /// Row bounds as start:end
        #[arg(long, value_parser = parse_span)]
        rows: (i32, i32),
    },
}

impl SheetCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load()?;
        let client = SheetsClient::new(&config.google).await?;
        self.run(&client).await
    }

    async fn run(&self, client: &impl SheetOperations) -> Result<()> {
        match self {
            SheetCommand::Append {
                spreadsheet_id,
                csv,
                target,
            } => {
                let data = Table::from_csv_reader(File::open(csv)?)?;
                client.append(&data, spreadsheet_id, target).await?;
                info!(rows = data.row_count(), "Rows appended");
            }
            SheetCommand::Read {
                spreadsheet_id,
                range,
                labels,
            } => {
                let table = client.read(spreadsheet_id, range, labels.clone()).await?;
                table.write_csv(std::io::stdout())?;
            }
            SheetCommand::Update {
                spreadsheet_id,
                csv,
                target,
            } => {
                let data = Table::from_csv_reader(File::open(csv)?)?;
                client.update(&data, spreadsheet_id, target).await?;
                info!(rows = data.row_count(), "Rows updated");
            }
            SheetCommand::Clear {
                spreadsheet_id,
                range,
            } => {
                client.clear(spreadsheet_id, range).await?;
                info!(range = range, "Range cleared");
            }
            SheetCommand::Bold {
                spreadsheet_id,
                rows,
                cols,
                off,
            } => {
                let rect = rect_from_spans(*rows, *cols);
                client.set_bold(spreadsheet_id, &rect, !off).await?;
                info!(bold = !off, "Bold formatting updated");
            }
            SheetCommand::Borders {
                spreadsheet_id,
                sheet,
                rows,
                cols,
                style,
                inner,
            } => {
                let rect = rect_from_spans(*rows, *cols);
                client
                    .set_borders(spreadsheet_id, *sheet, &rect, *style, *inner)
                    .await?;
                info!(style = %style, "Borders updated");
            }
            SheetCommand::Insert {
                spreadsheet_id,
                count,
                target,
            } => {
                client
                    .insert_blank_rows(*count, spreadsheet_id, target)
                    .await?;
                info!(rows = count, "Blank rows inserted");
            }
            SheetCommand::DeleteRows {
                spreadsheet_id,
                sheet,
                rows,
            } => {
                client
                    .delete_rows(spreadsheet_id, *sheet, rows.0, rows.1)
                    .await?;
                info!("Rows deleted");
            }
        }

        Ok(())
    }
}

fn rect_from_spans(rows: (i32, i32), cols: (i32, i32)) -> GridRect {
    GridRect {
        start_row: rows.0,
        end_row: rows.1,
        start_col: cols.0,
        end_col: cols.1,
    }
}

fn parse_span(s: &str) -> std::result::Result<(i32, i32), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", s))?;

    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid start '{}': {}", start, e))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid end '{}': {}", end, e))?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span("1:4").unwrap(), (1, 4));
        assert_eq!(parse_span(" 0 : 10 ").unwrap(), (0, 10));
    }

    #[test]
    fn test_parse_span_rejects_garbage() {
        assert!(parse_span("12").is_err());
        assert!(parse_span("a:b").is_err());
        assert!(parse_span("1:").is_err());
    }

    #[test]
    fn test_rect_from_spans() {
        let rect = rect_from_spans((2, 5), (1, 3));
        assert_eq!(
            rect,
            GridRect {
                start_row: 2,
                end_row: 5,
                start_col: 1,
                end_col: 3,
            }
        );
    }
}
