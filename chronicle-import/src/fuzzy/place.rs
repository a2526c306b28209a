//! Place Normalizer
//!
//! Maps free-text place names to canonical forms. Lookup order:
//! abbreviations (0.9), historical names (0.8), language variations (0.85).
//! Unmatched names are title-cased and reported with confidence 1.0, which
//! means "no correction applied" rather than "semantically certain".

use crate::tables::{ABBREVIATIONS, COORDINATES, HISTORICAL, LANGUAGE};
use serde::{Deserialize, Serialize};
use tracing::trace;

const ABBREVIATION_CONFIDENCE: f64 = 0.9;
const HISTORICAL_CONFIDENCE: f64 = 0.8;
const LANGUAGE_CONFIDENCE: f64 = 0.85;
const UNCHANGED_CONFIDENCE: f64 = 1.0;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Normalized place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyPlace {
    pub original: String,
    pub normalized: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Normalize a free-text place name
///
/// Blank input yields an empty normalized form with confidence 0.
pub fn normalize_place_name(input: &str) -> FuzzyPlace {
    let key = input.trim().to_lowercase();
    if key.is_empty() {
        return FuzzyPlace {
            original: input.to_string(),
            normalized: String::new(),
            confidence: 0.0,
            alternatives: Vec::new(),
            coordinates: None,
        };
    }

    let mapped = ABBREVIATIONS
        .get(key.as_str())
        .map(|name| (*name, ABBREVIATION_CONFIDENCE))
        .or_else(|| HISTORICAL.get(key.as_str()).map(|name| (*name, HISTORICAL_CONFIDENCE)))
        .or_else(|| LANGUAGE.get(key.as_str()).map(|name| (*name, LANGUAGE_CONFIDENCE)));

    let place = match mapped {
        Some((name, confidence)) => FuzzyPlace {
            original: input.to_string(),
            normalized: name.to_string(),
            confidence,
            alternatives: vec![input.trim().to_string(), name.to_string()],
            coordinates: lookup_coordinates(name),
        },
        None => {
            let normalized = title_case(&key);
            FuzzyPlace {
                original: input.to_string(),
                coordinates: lookup_coordinates(&normalized),
                normalized,
                confidence: UNCHANGED_CONFIDENCE,
                alternatives: vec![input.trim().to_string()],
            }
        }
    };

    trace!(
        input = %input,
        normalized = %place.normalized,
        confidence = place.confidence,
        "Normalized place name"
    );
    place
}

/// Capitalize the first letter of each whitespace-separated token, lowercase the rest
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup_coordinates(name: &str) -> Option<Coordinates> {
    COORDINATES
        .get(&name.to_lowercase())
        .map(|&(lat, lng)| Coordinates { lat, lng })
}
