//! Import validation layer
//!
//! # Validators
//! 1. **import_validator** - Per-row person/event checks
//! 2. **batch** - Whole-file validation report

pub mod batch;
pub mod import_validator;

pub use batch::{validate_batch, ImportReport, RowReport};
pub use import_validator::{
    validate_event_row, validate_person_row, validate_row, ImportValidator, ValidationResult,
};
