//! Spreadsheet export.

use rust_xlsxwriter::{Format, Workbook};

use crate::report::table::ReportTable;
use crate::report::ReportError;

pub const SHEET_NAME: &str = "Resume Analysis";
pub const REPORT_FILENAME: &str = "resume_analysis.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel rejects wider columns.
const MAX_COLUMN_WIDTH: usize = 255;
const COLUMN_PADDING: usize = 2;

/// Encodes the table as a single-sheet workbook: bold frozen header row,
/// every column sized to its longest cell.
pub fn render_xlsx(table: &ReportTable) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in table.headers().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header.as_str(), &header_format)?;
        }
        for (row_index, row) in table.rows().iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                worksheet.write_string(row_index as u32 + 1, col as u16, cell.as_str())?;
            }
        }
        for col in 0..table.headers().len() {
            worksheet.set_column_width(col as u16, column_width(table.column(col)) as f64)?;
        }
        worksheet.set_freeze_panes(1, 0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Longest cell in characters plus padding, capped at Excel's limit.
fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    let longest = cells.map(|c| c.chars().count()).max().unwrap_or(0);
    (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH)
}
