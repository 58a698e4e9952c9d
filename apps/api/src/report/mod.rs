// Reporter: everything produced from interpreted records.
// Spreadsheet, skills chart, cover letters, role trend notes.

use thiserror::Error;

pub mod chart;
pub mod cover_letter;
pub mod handlers;
pub mod table;
pub mod trends;
pub mod xlsx;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}
