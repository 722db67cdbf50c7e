use google_sheets4::FieldMask;
use google_sheets4::api::{
    Border, CellData, CellFormat, Color, DeleteDimensionRequest, DimensionRange, GridRange,
    RepeatCellRequest, Request, TextFormat, UpdateBordersRequest,
};

/// Rectangular row/column bounds for a formatting mutation.
///
/// `bold_request` reads them as zero-based half-open indices;
/// `borders_request` reads them as the one-based bounds the caller supplies
/// and decrements both endpoints before transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub start_row: i32,
    pub end_row: i32,
    pub start_col: i32,
    pub end_col: i32,
}

/// Border line styles accepted by the Sheets API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Dotted,
    Dashed,
    Solid,
    SolidMedium,
    SolidThick,
    Double,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::None => "NONE",
            BorderStyle::Dotted => "DOTTED",
            BorderStyle::Dashed => "DASHED",
            BorderStyle::Solid => "SOLID",
            BorderStyle::SolidMedium => "SOLID_MEDIUM",
            BorderStyle::SolidThick => "SOLID_THICK",
            BorderStyle::Double => "DOUBLE",
        }
    }
}

impl std::str::FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(BorderStyle::None),
            "DOTTED" => Ok(BorderStyle::Dotted),
            "DASHED" => Ok(BorderStyle::Dashed),
            "SOLID" => Ok(BorderStyle::Solid),
            "SOLID_MEDIUM" => Ok(BorderStyle::SolidMedium),
            "SOLID_THICK" => Ok(BorderStyle::SolidThick),
            "DOUBLE" => Ok(BorderStyle::Double),
            other => Err(format!("unknown border style '{}'", other)),
        }
    }
}

impl std::fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toggle bold over a rectangle, addressed without a sheet id (first tab).
pub(super) fn bold_request(rect: &GridRect, bold: bool) -> Request {
    Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(GridRange {
                sheet_id: None,
                start_row_index: Some(rect.start_row),
                end_row_index: Some(rect.end_row),
                start_column_index: Some(rect.start_col),
                end_column_index: Some(rect.end_col),
            }),
            cell: Some(CellData {
                user_entered_format: Some(CellFormat {
                    text_format: Some(TextFormat {
                        bold: Some(bold),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(FieldMask::new(&["userEnteredFormat.textFormat.bold"])),
        }),
        ..Default::default()
    }
}

/// Outer and inner borders over a rectangle given with one-based bounds.
pub(super) fn borders_request(
    sheet_id: i32,
    rect: &GridRect,
    style: BorderStyle,
    inner: BorderStyle,
) -> Request {
    let edge = |style: BorderStyle| Border {
        style: Some(style.as_str().to_string()),
        color: Some(Color {
            blue: Some(0.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    Request {
        update_borders: Some(UpdateBordersRequest {
            range: Some(GridRange {
                sheet_id: Some(sheet_id),
                start_row_index: Some(rect.start_row - 1),
                end_row_index: Some(rect.end_row - 1),
                start_column_index: Some(rect.start_col - 1),
                end_column_index: Some(rect.end_col - 1),
            }),
            top: Some(edge(style)),
            bottom: Some(edge(style)),
            left: Some(edge(style)),
            right: Some(edge(style)),
            inner_horizontal: Some(edge(inner)),
            inner_vertical: Some(edge(inner)),
        }),
        ..Default::default()
    }
}

/// Remove whole rows given with one-based bounds, shifting later rows up.
pub(super) fn delete_rows_request(sheet_id: i32, start_row: i32, end_row: i32) -> Request {
    Request {
        delete_dimension: Some(DeleteDimensionRequest {
            range: Some(DimensionRange {
                sheet_id: Some(sheet_id),
                dimension: Some("ROWS".to_string()),
                start_index: Some(start_row - 1),
                end_index: Some(end_row - 1),
            }),
        }),
        ..Default::default()
    }
}
