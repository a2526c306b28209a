//! Error types for chronicle-import
//!
//! Parsing, matching and validation never fail; these errors cover reading
//! import files.

use std::path::PathBuf;
use thiserror::Error;

/// Import file error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// File extension not recognised
    #[error("Unsupported file format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// File has no header row
    #[error("Import file is empty: {0:?}")]
    EmptyFile(PathBuf),
}

/// Result type for import file operations
pub type ImportResult<T> = Result<T, ImportError>;
