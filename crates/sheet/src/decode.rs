use crate::cell::cell_text;
use crate::error::{DecodeError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use recordbook_core::RawRow;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Extensions accepted by the import boundary.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// A data row together with its 1-based row number in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub number: u32,
    pub values: RawRow,
}

/// Whether `path` has an extension the importer accepts (case-insensitive).
pub fn is_supported_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Decode the first sheet of a workbook into header-keyed rows.
///
/// # Errors
///
/// Returns error if the bytes are not a workbook calamine can open, or the
/// first sheet cannot be read.
pub fn decode(bytes: &[u8]) -> Result<Vec<RawRow>> {
    Ok(decode_rows(bytes)?
        .into_iter()
        .map(|row| row.values)
        .collect())
}

/// Like [`decode`], keeping each row's position in the sheet.
///
/// Sheet row 1 holds the headers. Columns with an empty header are skipped,
/// and so are rows without any text.
///
/// # Errors
///
/// Returns error if the bytes are not a workbook calamine can open, or the
/// first sheet cannot be read.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DecodeError::Workbook(e.to_string()))?;

    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let Some(range) = workbook.worksheet_range_at(0) else {
        debug!("workbook has no sheets");
        return Ok(Vec::new());
    };
    let range = range.map_err(|e| DecodeError::Worksheet {
        sheet: sheet_name.clone(),
        message: e.to_string(),
    })?;

    // Headers live on sheet row 1 even when the used range starts lower
    let first_row = range.start().map_or(0, |(row, _)| row);
    let mut headers: Vec<String> = Vec::new();
    let mut decoded = Vec::new();
    for (offset, cells) in range.rows().enumerate() {
        let index = first_row + offset as u32;
        if index == 0 {
            headers = cells.iter().map(cell_text).collect();
            continue;
        }
        if cells.iter().all(is_blank) {
            continue;
        }
        decoded.push(SheetRow {
            number: index + 1,
            values: pair_with_headers(&headers, cells),
        });
    }

    if headers.is_empty() {
        debug!(sheet = %sheet_name, "sheet row 1 is empty");
    }
    debug!(sheet = %sheet_name, rows = decoded.len(), "decoded sheet");
    Ok(decoded)
}

/// Read a spreadsheet file and decode it.
///
/// # Errors
///
/// Returns error if the extension is not supported, the file cannot be read,
/// or decoding fails.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Vec<SheetRow>> {
    let path = path.as_ref();
    if !is_supported_file(path) {
        return Err(DecodeError::UnsupportedFile(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    decode_rows(&bytes)
}

fn is_blank(data: &Data) -> bool {
    cell_text(data).is_empty()
}

fn pair_with_headers(headers: &[String], cells: &[Data]) -> RawRow {
    let mut row = RawRow::new();
    for (col, header) in headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        let text = cells.get(col).map(cell_text).unwrap_or_default();
        row.insert(header.clone(), text);
    }
    row
}
