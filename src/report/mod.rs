//! Spreadsheet export of merged article records
//!
//! [`Report`] is the in-memory table: a header row followed by one row per
//! record, each cell tagged with the role that selects its style. Rendering
//! to `.xlsx` goes through `rust_xlsxwriter`.

pub mod style;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use tracing::{debug, info, instrument, warn};

use crate::error::{ReportError, Result};
use crate::models::ArticleRecord;

pub use style::{BorderSpec, CellRole, CellStyle, FontSpec, ReportStyle, RoleFormats};

/// Column titles, in output order
pub const HEADER: [&str; 6] = ["pmid", "Title", "Author", "Journal", "Pubdate", "Abstract"];

/// Name of the single worksheet ("papers")
pub const SHEET_NAME: &str = "論文";

/// Longest string a spreadsheet cell accepts, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    pub role: CellRole,
}

impl Cell {
    fn header(value: &str) -> Self {
        Self {
            value: value.to_string(),
            role: CellRole::Header,
        }
    }

    fn body(value: String) -> Self {
        Self {
            value,
            role: CellRole::Body,
        }
    }
}

/// In-memory report for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    term: String,
    date: NaiveDate,
    rows: Vec<Vec<Cell>>,
}

impl Report {
    /// Lay out the table for `records`
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pubmed_report::Report;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let report = Report::new("covid", date, Vec::new());
    ///
    /// assert_eq!(report.file_name(), "20240115_covid_.xlsx");
    /// assert_eq!(report.rows().len(), 1);
    /// ```
    pub fn new(term: impl Into<String>, date: NaiveDate, records: Vec<ArticleRecord>) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(HEADER.iter().map(|title| Cell::header(title)).collect());

        for record in records {
            let pmid = record.pmid.to_string();
            let values = [
                record.title,
                record.first_author,
                record.journal,
                record.pub_date,
                record.abstract_text,
            ];

            let mut row = Vec::with_capacity(HEADER.len());
            row.push(Cell::body(pmid.clone()));
            for (column, value) in HEADER[1..].iter().zip(values) {
                row.push(Cell::body(fit_cell(&pmid, column, value)));
            }
            rows.push(row);
        }

        Self {
            term: term.into(),
            date,
            rows,
        }
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn header_row(&self) -> &[Cell] {
        &self.rows[0]
    }

    pub fn body_rows(&self) -> &[Vec<Cell>] {
        &self.rows[1..]
    }

    /// `<YYYYMMDD>_<term>_`
    pub fn file_stem(&self) -> String {
        format!("{}_{}_", self.date.format("%Y%m%d"), self.term)
    }

    /// `<YYYYMMDD>_<term>_.xlsx`
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.file_stem())
    }

    /// Render into a workbook, styling each cell as it is written
    pub fn to_workbook(&self, style: &ReportStyle) -> Result<Workbook> {
        let export_error = |source| ReportError::Export {
            path: PathBuf::from(self.file_name()),
            source,
        };

        let formats = style.formats();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(export_error)?;

        for (row_index, row) in self.rows.iter().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                worksheet
                    .write_string_with_format(
                        row_index as u32,
                        col_index as u16,
                        cell.value.as_str(),
                        formats.get(cell.role),
                    )
                    .map_err(export_error)?;
            }
        }

        Ok(workbook)
    }

    /// Write `<dir>/<file_name>`, replacing any existing file
    #[instrument(skip(self, style), fields(file = %self.file_name()))]
    pub fn save(&self, dir: &Path, style: &ReportStyle) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let mut workbook = self.to_workbook(style)?;

        debug!(path = %path.display(), rows = self.rows.len(), "Writing workbook");
        workbook.save(&path).map_err(|source| ReportError::Export {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Cut `value` to [`MAX_CELL_CHARS`] characters so the writer accepts it
fn fit_cell(pmid: &str, column: &str, mut value: String) -> String {
    if let Some((cut, _)) = value.char_indices().nth(MAX_CELL_CHARS) {
        warn!(
            pmid = %pmid,
            column = %column,
            chars = value.chars().count(),
            limit = MAX_CELL_CHARS,
            "Cell value too long for a spreadsheet cell, truncating"
        );
        value.truncate(cut);
    }
    value
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportedReport {
    /// File name without the `.xlsx` extension
    pub file_stem: String,
    /// Where the workbook was written
    pub path: PathBuf,
    /// The table that was written
    pub report: Report,
}

/// Build the report for `records` and save it under `dir`
pub fn export_report(
    term: &str,
    records: Vec<ArticleRecord>,
    date: NaiveDate,
    dir: &Path,
    style: &ReportStyle,
) -> Result<ExportedReport> {
    let report = Report::new(term, date, records);
    let path = report.save(dir, style)?;

    info!(
        path = %path.display(),
        records = report.body_rows().len(),
        "Report saved"
    );

    Ok(ExportedReport {
        file_stem: report.file_stem(),
        path,
        report,
    })
}
