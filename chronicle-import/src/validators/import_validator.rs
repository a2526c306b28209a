//! Import Validator
//!
//! Per-row structural and logical checks for spreadsheet imports.
//!
//! # Severity
//! - **errors** make a row ineligible for import (missing name/title,
//!   unparseable date, dates out of order)
//! - **warnings** are quality notes that never block (approximate dates,
//!   missing dates, missing places)
//!
//! Validation never fails: every row yields a [`ValidationResult`].

use crate::fuzzy::date::{DateParser, DateUncertainty, FuzzyDate};
use crate::fuzzy::name::normalize_person_name;
use crate::records::{present, EventRecord, PersonRecord, RecordType, Row};
use chronicle_common::config::DateConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of validating one row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validate a person row with the default date configuration
pub fn validate_person_row(row: &Row) -> ValidationResult {
    ImportValidator::default().validate_person(&PersonRecord::from_row(row))
}

/// Validate an event row with the default date configuration
pub fn validate_event_row(row: &Row) -> ValidationResult {
    ImportValidator::default().validate_event(&EventRecord::from_row(row))
}

/// Validate a row of the given record type with the default date configuration
pub fn validate_row(record_type: RecordType, row: &Row) -> ValidationResult {
    ImportValidator::default().validate_row(record_type, row)
}

/// Row validator
#[derive(Debug, Clone, Default)]
pub struct ImportValidator {
    date_parser: DateParser,
}

impl ImportValidator {
    pub fn new(dates: DateConfig) -> Self {
        Self {
            date_parser: DateParser::new(dates),
        }
    }

    pub fn validate_row(&self, record_type: RecordType, row: &Row) -> ValidationResult {
        match record_type {
            RecordType::Person => self.validate_person(&PersonRecord::from_row(row)),
            RecordType::Event => self.validate_event(&EventRecord::from_row(row)),
        }
    }

    /// Check a person record
    ///
    /// # Rules
    /// - error: first or last name blank (one message when both are)
    /// - error: birth/death date present but unrecognised
    /// - warning: birth/death date recognised but not exact
    /// - error: birth date after death date
    /// - warning: no date at all; no place at all
    pub fn validate_person(&self, person: &PersonRecord) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let first = present(&person.first_name);
        let last = present(&person.last_name);
        match (first, last) {
            (None, None) => errors.push(
                "Missing name: at least one of first name or last name is required".to_string(),
            ),
            (None, Some(_)) => errors.push("Missing name: first name is required".to_string()),
            (Some(_), None) => errors.push("Missing name: last name is required".to_string()),
            (Some(_), Some(_)) => {}
        }
        for name in [first, last].into_iter().flatten() {
            let normalized = normalize_person_name(name);
            debug!(
                original = %normalized.original,
                normalized = %normalized.normalized,
                alternatives = ?normalized.alternatives,
                "Person name checked"
            );
        }

        let birth = self.check_date("Birth date", &person.birth_date, &mut errors, &mut warnings);
        let death = self.check_date("Death date", &person.death_date, &mut errors, &mut warnings);
        if let (Some(birth), Some(death)) = (&birth, &death) {
            check_order("Birth date", birth, "death date", death, &mut errors);
        }

        if present(&person.birth_date).is_none() && present(&person.death_date).is_none() {
            warnings.push("No dates provided".to_string());
        }
        if present(&person.birth_place).is_none() && present(&person.death_place).is_none() {
            warnings.push("No place provided".to_string());
        }

        let result = ValidationResult::from_findings(errors, warnings);
        debug!(
            person = %person.display_name(),
            is_valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Person row validated"
        );
        result
    }

    /// Check an event record
    ///
    /// # Rules
    /// - error: title blank
    /// - error: start/end date present but unrecognised
    /// - warning: start/end date recognised but not exact
    /// - error: start date after end date
    /// - warning: no date at all; no location; no description
    pub fn validate_event(&self, event: &EventRecord) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if present(&event.title).is_none() {
            errors.push("Missing title: event title is required".to_string());
        }

        let start = self.check_date("Start date", &event.start_date, &mut errors, &mut warnings);
        let end = self.check_date("End date", &event.end_date, &mut errors, &mut warnings);
        if let (Some(start), Some(end)) = (&start, &end) {
            check_order("Start date", start, "end date", end, &mut errors);
        }

        if present(&event.start_date).is_none() && present(&event.end_date).is_none() {
            warnings.push("No dates provided".to_string());
        }
        if present(&event.location).is_none() {
            warnings.push("No location provided".to_string());
        }
        if present(&event.description).is_none() {
            warnings.push("No description provided".to_string());
        }

        let result = ValidationResult::from_findings(errors, warnings);
        debug!(
            title = ?event.title,
            is_valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Event row validated"
        );
        result
    }

    /// Parse an optional date field, recording an error or warning
    ///
    /// Returns the parsed date only if it resolved to a concrete date.
    fn check_date(
        &self,
        label: &str,
        value: &Option<String>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) -> Option<FuzzyDate> {
        let text = present(value)?;
        let parsed = self.date_parser.parse(text);

        match parsed.uncertainty {
            DateUncertainty::Unknown => {
                errors.push(format!("Invalid {}: '{}'", label.to_lowercase(), text));
                None
            }
            DateUncertainty::Exact => Some(parsed),
            uncertainty => {
                warnings.push(format!(
                    "{} '{}' is {} (confidence {:.2})",
                    label,
                    text,
                    uncertainty.as_str().to_lowercase(),
                    parsed.confidence
                ));
                Some(parsed)
            }
        }
    }
}

/// Error if `earlier` resolves to a date after `later`
fn check_order(
    earlier_label: &str,
    earlier: &FuzzyDate,
    later_label: &str,
    later: &FuzzyDate,
    errors: &mut Vec<String>,
) {
    if let (Some(a), Some(b)) = (earlier.date, later.date) {
        if a > b {
            errors.push(format!(
                "{} ({}) is after {} ({})",
                earlier_label, earlier.original, later_label, later.original
            ));
        }
    }
}
