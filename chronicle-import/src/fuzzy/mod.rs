//! Fuzzy value parsing and comparison
//!
//! # Components
//! 1. **date** - Free-text historical dates with uncertainty levels
//! 2. **place** - Place name normalization via lookup tables
//! 3. **name** - Personal name similarity and normalization

pub mod date;
pub mod name;
pub mod place;

pub use date::{parse_fuzzy_date, DateParser, DateUncertainty, FuzzyDate};
pub use name::{
    calculate_name_similarity, levenshtein_distance, normalize_person_name, FuzzyName,
};
pub use place::{normalize_place_name, Coordinates, FuzzyPlace};
