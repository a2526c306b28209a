//! Batch validation report
//!
//! Validates every row of an import file. Only rows whose result is valid
//! are eligible for import; the rest are reported back with their errors.

use crate::records::{RecordType, Row};
use crate::validators::import_validator::{ImportValidator, ValidationResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Validation outcome for one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    /// 1-based data row number (header row excluded)
    pub row_number: usize,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Validation outcome for a whole import file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub record_type: RecordType,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    /// Rows eligible for import
    pub fn accepted_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| row.result.is_valid)
    }

    /// Rows excluded from import, with their errors
    pub fn rejected_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| !row.result.is_valid)
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_rows == 0
    }
}

/// Validate all rows with the default date configuration
pub fn validate_batch(record_type: RecordType, rows: &[Row]) -> ImportReport {
    ImportValidator::default().validate_batch(record_type, rows)
}

impl ImportValidator {
    /// Validate all rows of an import file
    pub fn validate_batch(&self, record_type: RecordType, rows: &[Row]) -> ImportReport {
        let rows: Vec<RowReport> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowReport {
                row_number: index + 1,
                result: self.validate_row(record_type, row),
            })
            .collect();

        let valid_rows = rows.iter().filter(|row| row.result.is_valid).count();
        let report = ImportReport {
            record_type,
            total_rows: rows.len(),
            valid_rows,
            invalid_rows: rows.len() - valid_rows,
            rows,
        };

        info!(
            record_type = %record_type,
            total = report.total_rows,
            valid = report.valid_rows,
            invalid = report.invalid_rows,
            "Batch validation complete"
        );

        report
    }
}
