mod mapping;
mod parser;
mod workbook;

use super::domain::{JobListing, ListingField};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid delimited listing data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("listing export is neither UTF-8 nor Shift_JIS text")]
    Encoding,
    #[error("listing export has no header row")]
    MissingHeader,
    #[error("spreadsheet contains no worksheets")]
    EmptyWorkbook,
}

/// A data row as read from the export, numbered by its 1-based line or sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub number: usize,
    pub cells: Vec<String>,
}

/// Header row plus data rows of one export.
pub(crate) type SourceTable = (Vec<String>, Vec<SourceRow>);

/// A listing export: the original table plus the listings derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    listings: Vec<JobListing>,
}

impl ListingDataset {
    pub fn from_table(headers: Vec<String>, source_rows: Vec<SourceRow>) -> Self {
        let columns = mapping::column_map(&headers);

        let mut rows = Vec::with_capacity(source_rows.len());
        let mut listings = Vec::with_capacity(source_rows.len());
        for SourceRow { number, cells } in source_rows {
            let mut listing = JobListing::new(number);
            for (field, column) in &columns {
                let value = cells.get(*column).map(String::as_str).unwrap_or("");
                listing.insert(*field, value);
            }
            listings.push(listing);
            rows.push(cells);
        }

        Self {
            headers,
            rows,
            listings,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Original cells of each data row, aligned with `listings`.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Screened fields whose column is not present in the export.
    pub fn absent_fields(&self) -> Vec<ListingField> {
        let columns = mapping::column_map(&self.headers);
        ListingField::ordered()
            .into_iter()
            .filter(|field| columns.iter().all(|(mapped, _)| mapped != field))
            .collect()
    }
}

/// Loads listing exports from delimited text or spreadsheets.
pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ListingDataset, ImportError> {
        let path = path.as_ref();
        let dataset = if workbook::is_workbook(path) {
            let (headers, rows) = workbook::read_first_sheet(path)?;
            ListingDataset::from_table(headers, rows)
        } else {
            let file = std::fs::File::open(path)?;
            Self::from_reader(file)?
        };

        let absent = dataset.absent_fields();
        if !absent.is_empty() {
            warn!(
                path = %path.display(),
                absent = ?absent,
                "listing export is missing screened columns"
            );
        }
        info!(path = %path.display(), rows = dataset.len(), "listing export loaded");

        Ok(dataset)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<ListingDataset, ImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = parser::decode_text(&bytes)?;
        Self::from_text(&content)
    }

    pub fn from_text(content: &str) -> Result<ListingDataset, ImportError> {
        let (headers, rows) = parser::parse_table(content)?;
        Ok(ListingDataset::from_table(headers, rows))
    }
}
