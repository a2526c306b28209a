//! chronicle-import library
//!
//! Fuzzy matching and validation for historical person/event imports.
//!
//! # Modules
//! - [`fuzzy`] - free-text dates, place names, personal names
//! - [`duplicates`] - scoring incoming records against an existing pool
//! - [`validators`] - per-row and whole-file import validation
//! - [`reader`] - CSV/TSV and spreadsheet rows
//! - [`records`] - typed person/event records built from rows
//! - [`tables`] - nickname and place lookup tables

pub mod duplicates;
pub mod error;
pub mod fuzzy;
pub mod reader;
pub mod records;
pub mod tables;
pub mod validators;

pub use duplicates::{
    detect_batch_person_duplicates, detect_event_duplicates, detect_person_duplicates,
    BatchDuplicates, DuplicateDetector, DuplicateMatch, MatchReason,
};
pub use error::{ImportError, ImportResult};
pub use fuzzy::{
    calculate_name_similarity, normalize_person_name, normalize_place_name, parse_fuzzy_date,
    DateUncertainty, FuzzyDate, FuzzyName, FuzzyPlace,
};
pub use records::{EventRecord, PersonRecord, RecordType, Row};
pub use validators::{
    validate_batch, validate_event_row, validate_person_row, ImportReport, ImportValidator,
    ValidationResult,
};
