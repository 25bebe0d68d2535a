use super::super::text::format_number;
use super::{ImportError, SourceRow, SourceTable};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

pub(crate) const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

pub(crate) fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Header row and data rows of the first worksheet, numbered by 1-based sheet row. Rows with
/// every cell blank are skipped.
pub(crate) fn read_first_sheet(path: &Path) -> Result<SourceTable, ImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;
    let header_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => return Err(ImportError::MissingHeader),
    };

    let data = rows
        .enumerate()
        .map(|(offset, row)| {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            cells.resize(headers.len().max(cells.len()), String::new());
            SourceRow {
                number: header_row + offset + 2,
                cells,
            }
        })
        .filter(|row| row.cells.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    Ok((headers, data))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        other => other.to_string(),
    }
}
