//! Import file reading
//!
//! Turns CSV/TSV or spreadsheet files into header-keyed rows. The first row
//! is always the header. Fully blank rows are skipped.
//!
//! - `.csv`, `.tsv`, `.txt`: delimiter sniffed from the first lines; files
//!   that are not UTF-8 are decoded as Windows-1252 (common for Excel exports)
//! - `.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`: first worksheet only

use crate::error::{ImportError, ImportResult};
use crate::records::Row;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use std::path::Path;
use tracing::{debug, info};

/// Read all data rows of an import file
pub fn read_rows(path: &Path) -> ImportResult<Vec<Row>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" | "tsv" | "txt" => {
            let bytes = std::fs::read(path)?;
            let content = decode_text(bytes);
            if content.trim().is_empty() {
                return Err(ImportError::EmptyFile(path.to_path_buf()));
            }
            read_rows_from_str(&content)?
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_rows(path)?,
        _ => return Err(ImportError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(path = %path.display(), rows = rows.len(), "Import file read");
    Ok(rows)
}

/// Parse delimited text with a header row
pub fn read_rows_from_str(content: &str) -> ImportResult<Vec<Row>> {
    let delimiter = sniff_delimiter(content);
    debug!(delimiter = %(delimiter as char).escape_default(), "Delimiter selected");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(zip_row(&headers, record.iter().map(str::to_string)));
    }

    Ok(rows)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = counts.first().copied().unwrap_or(0);
        if target <= 1 {
            continue;
        }

        // More columns breaks ties
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// UTF-8 if possible, otherwise Windows-1252
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

fn read_workbook_rows(path: &Path) -> ImportResult<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ImportError::Spreadsheet(format!("Failed to open {:?}: {}", path, e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::EmptyFile(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::Spreadsheet(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| ImportError::EmptyFile(path.to_path_buf()))?
        .iter()
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    let rows = sheet_rows
        .map(|cells| cells.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        .map(|cells| zip_row(&headers, cells.into_iter()))
        .collect();

    debug!(sheet = %sheet_name, "Worksheet read");
    Ok(rows)
}

/// Cell value as the text a CSV export would contain
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => excel_serial_to_iso(dt.as_f64()),
    }
}

/// Excel 1900 date system serial → `YYYY-MM-DD`
fn excel_serial_to_iso(serial: f64) -> String {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(serial.floor() as i64)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| serial.to_string())
}

/// Pair headers with cell values; extra cells without a header are dropped
fn zip_row(headers: &[String], values: impl Iterator<Item = String>) -> Row {
    headers
        .iter()
        .zip(values)
        .filter(|(header, _)| !header.is_empty())
        .map(|(header, value)| (header.clone(), value))
        .collect()
}
