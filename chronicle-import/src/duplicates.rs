//! Duplicate Detector
//!
//! Scores an incoming person or event against a pool of existing records.
//!
//! # Person Signals
//! Each signal is computed independently; a record's confidence is the
//! MAXIMUM signal (not a sum or average), tagged with the signal's reason.
//! - **name_similarity**: mean of first- and last-name similarity, only when
//!   both exceed 0.8 individually
//! - **birth_date_match**: both birth dates resolve and their years differ by
//!   at most 2 → `1 - year_diff / 10`
//! - **birth_place_match**: normalized birth places are equal → 0.9
//!
//! # Event Signals
//! - **title_similarity**: title similarity ≥ 0.8 → the similarity
//! - **date_location_match**: start dates within 24 hours and location
//!   similarity > 0.7 → the location similarity
//!
//! Matches below the threshold are dropped; the rest are sorted by
//! descending confidence. Ties between signals go to the one listed first.

use crate::fuzzy::date::DateParser;
use crate::fuzzy::name::{levenshtein_similarity, name_similarity_with};
use crate::fuzzy::place::normalize_place_name;
use crate::records::{present, EventRecord, PersonRecord};
use chrono::NaiveDate;
use chronicle_common::config::{DateConfig, MatchingConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Signal that produced a duplicate match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    NameSimilarity,
    BirthDateMatch,
    BirthPlaceMatch,
    TitleSimilarity,
    DateLocationMatch,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::NameSimilarity => "name_similarity",
            MatchReason::BirthDateMatch => "birth_date_match",
            MatchReason::BirthPlaceMatch => "birth_place_match",
            MatchReason::TitleSimilarity => "title_similarity",
            MatchReason::DateLocationMatch => "date_location_match",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Existing record judged likely to be the same entity as the incoming one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch<R> {
    pub candidate_record: R,
    pub confidence: f64,
    pub reason: MatchReason,
}

/// Duplicate matches for one record of an incoming batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDuplicates<R> {
    /// Zero-based position of the record in the incoming batch
    pub index: usize,
    pub record: R,
    pub matches: Vec<DuplicateMatch<R>>,
}

/// Detect person duplicates with the default configuration
pub fn detect_person_duplicates(
    new_record: &PersonRecord,
    existing_records: &[PersonRecord],
    threshold: f64,
) -> Vec<DuplicateMatch<PersonRecord>> {
    DuplicateDetector::default().detect_person_duplicates(new_record, existing_records, threshold)
}

/// Detect event duplicates with the default configuration
pub fn detect_event_duplicates(
    new_record: &EventRecord,
    existing_records: &[EventRecord],
    threshold: f64,
) -> Vec<DuplicateMatch<EventRecord>> {
    DuplicateDetector::default().detect_event_duplicates(new_record, existing_records, threshold)
}

/// Detect duplicates for every person in an incoming batch
pub fn detect_batch_person_duplicates(
    new_records: &[PersonRecord],
    existing_records: &[PersonRecord],
    threshold: f64,
) -> Vec<BatchDuplicates<PersonRecord>> {
    DuplicateDetector::default().detect_batch_person_duplicates(new_records, existing_records, threshold)
}

/// Duplicate detector with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct DuplicateDetector {
    matching: MatchingConfig,
    date_parser: DateParser,
}

/// Person fields resolved once per comparison side
struct PersonKey<'a> {
    first_name: &'a str,
    last_name: &'a str,
    birth_date: Option<NaiveDate>,
    birth_place: String,
}

/// Event fields resolved once per comparison side
struct EventKey<'a> {
    title: &'a str,
    start_date: Option<NaiveDate>,
    location: String,
}

impl DuplicateDetector {
    pub fn new(matching: MatchingConfig, dates: DateConfig) -> Self {
        Self {
            matching,
            date_parser: DateParser::new(dates),
        }
    }

    pub fn matching(&self) -> &MatchingConfig {
        &self.matching
    }

    /// Score `new_record` against every existing person
    ///
    /// # Returns
    /// Matches with confidence ≥ `threshold`, highest first
    pub fn detect_person_duplicates(
        &self,
        new_record: &PersonRecord,
        existing_records: &[PersonRecord],
        threshold: f64,
    ) -> Vec<DuplicateMatch<PersonRecord>> {
        let incoming = self.person_key(new_record);

        let mut matches: Vec<DuplicateMatch<PersonRecord>> = existing_records
            .iter()
            .filter_map(|existing| {
                let (confidence, reason) = self.score_person(&incoming, &self.person_key(existing))?;
                (confidence >= threshold).then(|| DuplicateMatch {
                    candidate_record: existing.clone(),
                    confidence,
                    reason,
                })
            })
            .collect();

        sort_matches(&mut matches);

        debug!(
            person = %new_record.display_name(),
            candidates = existing_records.len(),
            matches = matches.len(),
            top_confidence = ?matches.first().map(|m| m.confidence),
            threshold,
            "Person duplicate detection complete"
        );

        matches
    }

    /// Score `new_record` against every existing event
    ///
    /// # Returns
    /// Matches with confidence ≥ `threshold`, highest first
    pub fn detect_event_duplicates(
        &self,
        new_record: &EventRecord,
        existing_records: &[EventRecord],
        threshold: f64,
    ) -> Vec<DuplicateMatch<EventRecord>> {
        let incoming = self.event_key(new_record);

        let mut matches: Vec<DuplicateMatch<EventRecord>> = existing_records
            .iter()
            .filter_map(|existing| {
                let (confidence, reason) = self.score_event(&incoming, &self.event_key(existing))?;
                (confidence >= threshold).then(|| DuplicateMatch {
                    candidate_record: existing.clone(),
                    confidence,
                    reason,
                })
            })
            .collect();

        sort_matches(&mut matches);

        debug!(
            title = ?new_record.title,
            candidates = existing_records.len(),
            matches = matches.len(),
            top_confidence = ?matches.first().map(|m| m.confidence),
            threshold,
            "Event duplicate detection complete"
        );

        matches
    }

    /// Run person detection for each incoming record, omitting records with no matches
    pub fn detect_batch_person_duplicates(
        &self,
        new_records: &[PersonRecord],
        existing_records: &[PersonRecord],
        threshold: f64,
    ) -> Vec<BatchDuplicates<PersonRecord>> {
        new_records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let matches = self.detect_person_duplicates(record, existing_records, threshold);
                (!matches.is_empty()).then(|| BatchDuplicates {
                    index,
                    record: record.clone(),
                    matches,
                })
            })
            .collect()
    }

    /// Run event detection for each incoming record, omitting records with no matches
    pub fn detect_batch_event_duplicates(
        &self,
        new_records: &[EventRecord],
        existing_records: &[EventRecord],
        threshold: f64,
    ) -> Vec<BatchDuplicates<EventRecord>> {
        new_records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let matches = self.detect_event_duplicates(record, existing_records, threshold);
                (!matches.is_empty()).then(|| BatchDuplicates {
                    index,
                    record: record.clone(),
                    matches,
                })
            })
            .collect()
    }

    fn person_key<'a>(&self, record: &'a PersonRecord) -> PersonKey<'a> {
        PersonKey {
            first_name: present(&record.first_name).unwrap_or_default(),
            last_name: present(&record.last_name).unwrap_or_default(),
            birth_date: present(&record.birth_date).and_then(|text| self.date_parser.parse(text).date),
            birth_place: present(&record.birth_place)
                .map(|text| normalize_place_name(text).normalized)
                .unwrap_or_default(),
        }
    }

    fn event_key<'a>(&self, record: &'a EventRecord) -> EventKey<'a> {
        EventKey {
            title: present(&record.title).unwrap_or_default(),
            start_date: present(&record.start_date).and_then(|text| self.date_parser.parse(text).date),
            location: present(&record.location)
                .map(|text| normalize_place_name(text).normalized)
                .unwrap_or_default(),
        }
    }

    /// Strongest person signal, if any applies
    fn score_person(&self, a: &PersonKey<'_>, b: &PersonKey<'_>) -> Option<(f64, MatchReason)> {
        let cfg = &self.matching;
        let mut best: Option<(f64, MatchReason)> = None;

        let first = name_similarity_with(a.first_name, b.first_name, cfg.nickname_similarity);
        let last = name_similarity_with(a.last_name, b.last_name, cfg.nickname_similarity);
        if first > cfg.name_component_threshold && last > cfg.name_component_threshold {
            consider(&mut best, (first + last) / 2.0, MatchReason::NameSimilarity);
        }

        if let (Some(da), Some(db)) = (a.birth_date, b.birth_date) {
            let year_diff = year_difference(da, db);
            if year_diff <= cfg.birth_year_window {
                let confidence = (1.0 - f64::from(year_diff) / 10.0).max(0.0);
                consider(&mut best, confidence, MatchReason::BirthDateMatch);
            }
        }

        if !a.birth_place.is_empty() && a.birth_place == b.birth_place {
            consider(&mut best, cfg.place_match_confidence, MatchReason::BirthPlaceMatch);
        }

        best
    }

    /// Strongest event signal, if any applies
    fn score_event(&self, a: &EventKey<'_>, b: &EventKey<'_>) -> Option<(f64, MatchReason)> {
        let cfg = &self.matching;
        let mut best: Option<(f64, MatchReason)> = None;

        let title = name_similarity_with(a.title, b.title, cfg.nickname_similarity);
        if title >= cfg.event_title_threshold {
            consider(&mut best, title, MatchReason::TitleSimilarity);
        }

        if let (Some(da), Some(db)) = (a.start_date, b.start_date) {
            let hours_apart = (da - db).num_hours().abs();
            if hours_apart <= cfg.event_date_window_hours {
                let location = place_similarity(&a.location, &b.location);
                if location > cfg.event_location_threshold {
                    consider(&mut best, location, MatchReason::DateLocationMatch);
                }
            }
        }

        best
    }
}

/// Replace `best` only with a strictly higher confidence
fn consider(best: &mut Option<(f64, MatchReason)>, confidence: f64, reason: MatchReason) {
    if best.map_or(true, |(current, _)| confidence > current) {
        *best = Some((confidence, reason));
    }
}

fn year_difference(a: NaiveDate, b: NaiveDate) -> i32 {
    use chrono::Datelike;
    (a.year() - b.year()).abs()
}

/// Similarity of two already-normalized place names
fn place_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    levenshtein_similarity(&a.to_lowercase(), &b.to_lowercase())
}

fn sort_matches<R>(matches: &mut [DuplicateMatch<R>]) {
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first: &str, last: &str, birth_date: &str, birth_place: &str) -> PersonRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PersonRecord {
            first_name: opt(first),
            last_name: opt(last),
            birth_date: opt(birth_date),
            birth_place: opt(birth_place),
            ..Default::default()
        }
    }

    fn event(title: &str, start_date: &str, location: &str) -> EventRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        EventRecord {
            title: opt(title),
            start_date: opt(start_date),
            location: opt(location),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_signal_requires_both_components() {
        let existing = vec![person("William", "Smith", "", "")];

        let nickname = detect_person_duplicates(&person("Bill", "Smith", "", ""), &existing, 0.5);
        assert_eq!(nickname.len(), 1);
        assert_eq!(nickname[0].reason, MatchReason::NameSimilarity);
        assert!((nickname[0].confidence - 0.95).abs() < 1e-9);

        // Last name identical but first name too far: the name signal is skipped entirely
        let other = detect_person_duplicates(&person("Robert", "Smith", "", ""), &existing, 0.0);
        assert!(other.is_empty());
    }

    #[test]
    fn test_birth_date_window() {
        let existing = vec![
            person("A", "One", "1890", ""),
            person("B", "Two", "1892-06-01", ""),
            person("C", "Three", "1893", ""),
        ];
        let incoming = person("Z", "Zed", "1890-03-15", "");

        let matches = detect_person_duplicates(&incoming, &existing, 0.0);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].candidate_record.last_name.as_deref(), Some("One"));
        assert_eq!(matches[0].confidence, 1.0);
        assert_eq!(matches[0].reason, MatchReason::BirthDateMatch);
        assert!((matches[1].confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_birth_place_uses_normalized_form() {
        let existing = vec![person("X", "Alpha", "", "Constantinople")];
        let matches = detect_person_duplicates(&person("Y", "Beta", "", "istanbul"), &existing, 0.8);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].reason, MatchReason::BirthPlaceMatch);
        assert_eq!(matches[0].confidence, 0.9);
    }

    #[test]
    fn test_max_signal_wins() {
        let existing = vec![person("John", "Doe", "1890-01-01", "Berlin")];
        let matches = detect_person_duplicates(&person("John", "Doe", "1891", "Berlin"), &existing, 0.0);

        // Name 1.0 beats birth date 0.9 and birth place 0.9
        assert_eq!(matches[0].reason, MatchReason::NameSimilarity);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn test_threshold_filters_and_sorts() {
        let existing = vec![
            person("P", "Low", "", "Paris"),
            person("Q", "High", "1850", ""),
            person("R", "None", "1700", "Rome"),
        ];
        let incoming = person("S", "New", "1850", "paris");

        let matches = detect_person_duplicates(&incoming, &existing, 0.8);
        assert_eq!(matches.len(), 2);
        assert!(matches.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert!(matches.iter().all(|m| m.confidence >= 0.8));

        let strict = detect_person_duplicates(&incoming, &existing, 0.95);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].reason, MatchReason::BirthDateMatch);
    }

    #[test]
    fn test_unknown_dates_never_match() {
        let existing = vec![person("A", "B", "unknown", "")];
        let matches = detect_person_duplicates(&person("C", "D", "unknown", ""), &existing, 0.0);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_event_title_similarity() {
        let existing = vec![event("Battle of Waterloo", "1815-06-18", "Waterloo")];
        let matches = detect_event_duplicates(&event("battle of waterloo", "", ""), &existing, 0.8);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].reason, MatchReason::TitleSimilarity);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn test_event_date_location_match() {
        let existing = vec![event("Signing ceremony", "1919-06-28", "Versailles")];

        let next_day = detect_event_duplicates(
            &event("Treaty signed", "1919-06-29", "versailles"),
            &existing,
            0.7,
        );
        assert_eq!(next_day.len(), 1);
        assert_eq!(next_day[0].reason, MatchReason::DateLocationMatch);
        assert_eq!(next_day[0].confidence, 1.0);

        let two_days = detect_event_duplicates(
            &event("Treaty signed", "1919-06-30", "Versailles"),
            &existing,
            0.0,
        );
        assert!(two_days.is_empty());

        let elsewhere = detect_event_duplicates(
            &event("Treaty signed", "1919-06-28", "Paris"),
            &existing,
            0.0,
        );
        assert!(elsewhere.is_empty());
    }

    #[test]
    fn test_batch_detection_skips_unmatched() {
        let existing = vec![person("Ada", "Lovelace", "1815-12-10", "London")];
        let incoming = vec![
            person("Charles", "Babbage", "1791", "London"),
            person("Mary", "Shelley", "1797", "Somers Town"),
            person("Ada", "Lovelace", "1815", ""),
        ];

        let batch = detect_batch_person_duplicates(&incoming, &existing, 0.8);
        let indexes: Vec<usize> = batch.iter().map(|b| b.index).collect();
        assert_eq!(indexes, vec![0, 2]);
        assert_eq!(batch[0].matches[0].reason, MatchReason::BirthPlaceMatch);
        assert_eq!(batch[1].matches[0].reason, MatchReason::NameSimilarity);
    }

    #[test]
    fn test_custom_config() {
        let detector = DuplicateDetector::new(
            MatchingConfig {
                birth_year_window: 5,
                ..MatchingConfig::default()
            },
            DateConfig::default(),
        );
        let existing = vec![person("A", "One", "1880", "")];

        let matches = detector.detect_person_duplicates(&person("B", "Two", "1885", ""), &existing, 0.0);
        assert_eq!(matches.len(), 1);
        assert!((matches[0].confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_reason_serialises_snake_case() {
        let json = serde_json::to_string(&MatchReason::DateLocationMatch).unwrap();
        assert_eq!(json, "\"date_location_match\"");
    }
}
