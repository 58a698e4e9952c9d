use crate::analysis::fields::ResumeField;
use crate::analysis::record::ExtractedRecord;

pub const COVER_LETTER_COLUMN: &str = "Cover Letter";

/// Records flattened into rows with a fixed column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// One row per record, thirteen columns in field order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ExtractedRecord>) -> Self {
        let headers = ResumeField::ALL
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        let rows = records
            .into_iter()
            .map(|record| record.iter().map(|(_, v)| v.to_string()).collect())
            .collect();
        Self { headers, rows }
    }

    /// Appends a `Cover Letter` column. Rows without a letter get an empty cell.
    pub fn with_cover_letters(mut self, letters: &[String]) -> Self {
        self.headers.push(COVER_LETTER_COLUMN.to_string());
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.push(letters.get(i).cloned().unwrap_or_default());
        }
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cells of one column, header first.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.headers[index].as_str())
            .chain(self.rows.iter().map(move |r| r[index].as_str()))
    }
}
