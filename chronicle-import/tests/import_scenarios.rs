//! End-to-end import scenarios
//!
//! Exercise the public API the way the CLI does: rows in, reports and
//! duplicate matches out.

use chronicle_common::config::{DateConfig, MatchingConfig, TomlConfig};
use chronicle_import::{
    calculate_name_similarity, detect_person_duplicates, normalize_place_name, parse_fuzzy_date,
    validate_batch, validate_person_row, DateUncertainty, DuplicateDetector, EventRecord,
    MatchReason, PersonRecord, RecordType, Row,
};

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn person(first: &str, last: &str, birth_date: &str, birth_place: &str) -> PersonRecord {
    PersonRecord {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        birth_date: Some(birth_date.to_string()),
        birth_place: Some(birth_place.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_john_jon_doe_single_match() {
    let existing = vec![person("John", "Doe", "1890-01-01", "Berlin")];
    let candidate = person("Jon", "Doe", "1890-01-01", "Berlin");

    let matches = detect_person_duplicates(&candidate, &existing, 0.7);

    assert_eq!(matches.len(), 1);
    // Jon/John scores 0.75, below the per-component bar, so the strongest
    // remaining signal is the identical birth year
    assert_eq!(matches[0].reason, MatchReason::BirthDateMatch);
    assert!(matches[0].confidence >= 0.9);
    assert_eq!(matches[0].confidence, 1.0);
    assert_eq!(matches[0].candidate_record.first_name.as_deref(), Some("John"));
}

#[test]
fn test_matches_sorted_and_above_threshold() {
    let existing = vec![
        person("Mary", "Shelley", "1797-08-30", "London"),
        person("Percy", "Shelley", "1792-08-04", "Horsham"),
        person("Mary", "Shelly", "1798", "Somers Town"),
        person("Someone", "Else", "1700", "Paris"),
        person("Mary", "Wollstonecraft", "1759", "Spitalfields"),
    ];
    let candidate = person("Mary", "Shelley", "1797", "London");

    let matches = detect_person_duplicates(&candidate, &existing, 0.8);

    assert!(!matches.is_empty());
    assert!(matches.iter().all(|m| m.confidence >= 0.8));
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));
    assert!(matches
        .iter()
        .all(|m| m.candidate_record.first_name.as_deref() != Some("Someone")));
}

#[test]
fn test_invalid_person_row_scenario() {
    let result = validate_person_row(&row(&[
        ("first_name", ""),
        ("last_name", "Invalid"),
        ("birth_date", "invalid-date"),
    ]));

    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|e| e.starts_with("Missing name")));
    assert!(result.errors.iter().any(|e| e.contains("Invalid birth date")));
}

#[test]
fn test_person_row_without_any_name() {
    let result = validate_person_row(&row(&[
        ("first_name", ""),
        ("last_name", " "),
        ("birth_date", "invalid-date"),
    ]));

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].starts_with("Missing name"));
    assert!(result.errors[1].contains("Invalid birth date"));
}

#[test]
fn test_documented_date_examples() {
    let exact = parse_fuzzy_date("1945-05-08");
    assert_eq!(exact.uncertainty, DateUncertainty::Exact);
    assert_eq!(exact.confidence, 1.0);
    assert_eq!(exact.date.map(|d| d.to_string()).as_deref(), Some("1945-05-08"));

    let year = parse_fuzzy_date("1945");
    assert_eq!(year.uncertainty, DateUncertainty::Approximate);
    assert_eq!(year.confidence, 0.8);
    assert_eq!(year.date.map(|d| d.to_string()).as_deref(), Some("1945-01-01"));

    let circa = parse_fuzzy_date("c. 1890");
    assert_eq!(circa.uncertainty, DateUncertainty::Approximate);
    assert_eq!(circa.confidence, 0.7);
    assert_eq!(circa.date.map(|d| d.to_string()).as_deref(), Some("1890-01-01"));

    let unknown = parse_fuzzy_date("not-a-date");
    assert_eq!(unknown.uncertainty, DateUncertainty::Unknown);
    assert_eq!(unknown.confidence, 0.0);
    assert!(unknown.date.is_none());
}

#[test]
fn test_date_json_shape() {
    let json = serde_json::to_value(parse_fuzzy_date("1945")).unwrap();
    assert_eq!(json["uncertainty"], "APPROXIMATE");
    assert_eq!(json["date"], "1945-01-01");

    let json = serde_json::to_value(parse_fuzzy_date("not-a-date")).unwrap();
    assert!(json["date"].is_null());
}

#[test]
fn test_name_and_place_examples() {
    assert_eq!(calculate_name_similarity("William", "Bill"), 0.9);
    assert_eq!(calculate_name_similarity("Eleanor", "Eleanor"), 1.0);
    assert_eq!(
        calculate_name_similarity("Katherine", "Catherine"),
        calculate_name_similarity("Catherine", "Katherine")
    );

    assert_eq!(normalize_place_name("NYC").normalized, "New York City");
    let unknown = normalize_place_name("Unknown Town");
    assert_eq!(unknown.normalized, "Unknown Town");
    assert_eq!(unknown.confidence, 1.0);
}

#[test]
fn test_batch_validation_from_rows() {
    let rows = vec![
        row(&[("Title", "Battle of Waterloo"), ("Date", "1815-06-18"), ("Location", "Waterloo")]),
        row(&[("Title", ""), ("Date", "1815")]),
    ];

    let report = validate_batch(RecordType::Event, &rows);

    assert_eq!(report.total_rows, 2);
    assert_eq!(report.valid_rows, 1);
    assert_eq!(report.rejected_rows().next().map(|r| r.row_number), Some(2));
}

#[test]
fn test_configured_detector_changes_outcome() {
    let config = TomlConfig::from_toml_str(
        r#"
[matching]
birth_year_window = 0
place_match_confidence = 0.5
"#,
    )
    .unwrap();
    let detector = DuplicateDetector::new(config.matching, config.dates);

    let existing = vec![person("Anna", "Karenina", "1850", "Moskva")];
    let candidate = person("Ana", "Karenin", "1851", "Moscow");

    // Year differs by one and the window is zero; the place signal is
    // configured below the threshold
    let matches = detector.detect_person_duplicates(&candidate, &existing, 0.6);
    assert!(matches.is_empty());

    let default_matches =
        DuplicateDetector::new(MatchingConfig::default(), DateConfig::default())
            .detect_person_duplicates(&candidate, &existing, 0.6);
    assert_eq!(default_matches.len(), 1);
    assert_eq!(default_matches[0].reason, MatchReason::BirthDateMatch);
}

#[test]
fn test_event_batch_duplicates() {
    let existing = vec![EventRecord {
        title: Some("Treaty of Versailles".to_string()),
        start_date: Some("1919-06-28".to_string()),
        location: Some("Versailles".to_string()),
        ..Default::default()
    }];
    let incoming = vec![
        EventRecord {
            title: Some("Signing of the peace treaty".to_string()),
            start_date: Some("1919-06-28".to_string()),
            location: Some("Versailles".to_string()),
            ..Default::default()
        },
        EventRecord {
            title: Some("Moon landing".to_string()),
            start_date: Some("1969-07-20".to_string()),
            ..Default::default()
        },
    ];

    let batch = DuplicateDetector::default().detect_batch_event_duplicates(&incoming, &existing, 0.8);

    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].index, 0);
    assert_eq!(batch[0].matches[0].reason, MatchReason::DateLocationMatch);
    assert_eq!(batch[0].matches[0].confidence, 1.0);
}
