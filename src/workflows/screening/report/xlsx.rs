use super::super::domain::{CheckKind, ListingField, Verdict};
use super::{ReportRow, ScreeningReport};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::info;

pub const RESULTS_SHEET: &str = "results";
pub const REJECTS_SHEET: &str = "rejects";
pub const NEEDS_REVIEW_SHEET: &str = "needs_review";

const WAGE_HEADERS: [&str; 6] = [
    "region used",
    "region minimum wage",
    "wage unit",
    "wage lower bound",
    "normalized hourly",
    "wage provenance",
];

const DEBUG_FIELDS: [ListingField; 4] = [
    ListingField::WorkAddress,
    ListingField::Locality,
    ListingField::MonthlyHours,
    ListingField::JobTitle,
];

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write screening workbook: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes a screening report as a workbook with a full sheet and two filtered views.
pub struct ScreeningWorkbookWriter<'a> {
    report: &'a ScreeningReport,
}

impl<'a> ScreeningWorkbookWriter<'a> {
    pub fn new(report: &'a ScreeningReport) -> Self {
        Self { report }
    }

    pub fn write(&self, path: &Path) -> Result<PathBuf, ReportError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ReportError::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut workbook = self.build()?;
        workbook.save(path)?;

        info!(
            path = %path.display(),
            rows = self.report.len(),
            "screening workbook written"
        );
        Ok(path.to_path_buf())
    }

    pub fn to_buffer(&self) -> Result<Vec<u8>, ReportError> {
        let mut workbook = self.build()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self) -> Result<Workbook, ReportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let headers = self.headers();

        let sheets: [(&str, Option<Verdict>); 3] = [
            (RESULTS_SHEET, None),
            (REJECTS_SHEET, Some(Verdict::Reject)),
            (NEEDS_REVIEW_SHEET, Some(Verdict::NeedsReview)),
        ];

        for (name, filter) in sheets {
            let worksheet = workbook.add_worksheet().set_name(name)?;
            for (col, header) in headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
            }
            worksheet.set_freeze_panes(1, 0)?;

            let rows = self
                .report
                .rows()
                .filter(|row| filter.map_or(true, |verdict| row.outcome.verdict == verdict));
            for (index, row) in rows.enumerate() {
                write_row(worksheet, index as u32 + 1, &row)?;
            }
        }

        Ok(workbook)
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "row".to_string(),
            "verdict".to_string(),
            "reason".to_string(),
        ];
        headers.extend(CheckKind::ordered().iter().map(|check| check.label().to_string()));
        headers.extend(WAGE_HEADERS.iter().map(|header| header.to_string()));
        headers.extend(
            DEBUG_FIELDS
                .iter()
                .map(|field| format!("debug: {}", field.label())),
        );
        headers.extend(self.report.dataset().headers().iter().cloned());
        headers
    }
}

fn write_row(worksheet: &mut Worksheet, row: u32, entry: &ReportRow<'_>) -> Result<(), XlsxError> {
    let outcome = entry.outcome;
    let mut col: u16 = 0;

    worksheet.write_number(row, col, outcome.row_number as f64)?;
    col += 1;
    worksheet.write_string(row, col, outcome.verdict.label())?;
    col += 1;
    write_text(worksheet, row, col, &outcome.reason)?;
    col += 1;

    for check in CheckKind::ordered() {
        if let Some(verdict) = outcome.check_verdict(check) {
            worksheet.write_string(row, col, verdict.label())?;
        }
        col += 1;
    }

    let wage = &outcome.wage;
    write_text(worksheet, row, col, &wage.region_used)?;
    col += 1;
    write_optional_number(worksheet, row, col, wage.region_minimum_wage.map(f64::from))?;
    col += 1;
    write_optional_number(worksheet, row, col, wage.wage_unit_raw.map(|code| code as f64))?;
    col += 1;
    write_optional_number(worksheet, row, col, wage.wage_lower_raw)?;
    col += 1;
    write_optional_number(
        worksheet,
        row,
        col,
        wage.normalized_hourly.map(|hourly| (hourly * 100.0).round() / 100.0),
    )?;
    col += 1;
    write_text(worksheet, row, col, &wage.provenance)?;
    col += 1;

    for field in DEBUG_FIELDS {
        write_text(worksheet, row, col, entry.listing.text(field))?;
        col += 1;
    }

    for cell in entry.cells {
        write_text(worksheet, row, col, cell)?;
        col += 1;
    }

    Ok(())
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<(), XlsxError> {
    if !text.is_empty() {
        worksheet.write_string(row, col, text)?;
    }
    Ok(())
}

fn write_optional_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), XlsxError> {
    if let Some(value) = value {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}
