use crate::error::{Result, XlsxToJsonError};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::{Duration, NaiveDateTime, Timelike};
use log::debug;
use std::path::Path;

/// Opens the workbook at `path` and returns every row of `sheet` as cell text.
pub fn read_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|source| XlsxToJsonError::WorkbookOpen {
            path: path.to_path_buf(),
            source,
        })?;

    let sheet_names = workbook.sheet_names();
    debug!("Worksheets in {}: {:?}", path.display(), sheet_names);
    if !sheet_names.iter().any(|name| name.as_str() == sheet) {
        return Err(XlsxToJsonError::WorksheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|source| XlsxToJsonError::WorkbookOpen {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(range_to_rows(&range))
}

/// Lays the used range out as if it were read from A1.
///
/// Leading rows and columns outside the used range become empty rows and
/// empty cells. Trailing empty cells of each row and trailing empty rows are
/// dropped, so rows may differ in length.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (row_offset, col_offset) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Vec::new(),
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells: Vec<String> = std::iter::repeat(String::new())
            .take(col_offset)
            .chain(row.iter().map(cell_to_string))
            .collect();
        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => format_date_time(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Dates follow the workbook's date system (1900 or 1904); durations are
/// rendered as elapsed `[h]:mm:ss`. Falls back to the raw serial.
fn format_date_time(dt: &ExcelDateTime) -> String {
    let rendered = if dt.is_duration() {
        dt.as_duration().map(format_duration)
    } else {
        dt.as_datetime().and_then(format_timestamp)
    };
    rendered.unwrap_or_else(|| dt.as_f64().to_string())
}

/// `YYYY-MM-DD`, with ` HH:MM:SS` appended unless the time rounds to midnight.
fn format_timestamp(datetime: NaiveDateTime) -> Option<String> {
    let datetime = datetime.checked_add_signed(Duration::milliseconds(500))?;
    if datetime.num_seconds_from_midnight() == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

fn format_duration(duration: Duration) -> String {
    let seconds = (duration.num_milliseconds() as f64 / 1000.0).round() as i64;
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}
