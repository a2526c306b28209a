//! Person and event records built from spreadsheet rows
//!
//! Rows arrive as header-keyed string maps. Headers are matched
//! case-insensitively, with spaces and dashes folded to underscores, and a
//! handful of common aliases accepted (`Given Name`, `Surname`, `Born`, ...).
//! Blank cells are treated as absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Header-keyed spreadsheet row
pub type Row = HashMap<String, String>;

/// Kind of record held by an import file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Person,
    Event,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Person => "person",
            RecordType::Event => "event",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" | "persons" | "people" => Ok(RecordType::Person),
            "event" | "events" => Ok(RecordType::Event),
            other => Err(format!("Unknown record type '{}' (expected person or event)", other)),
        }
    }
}

/// Person as read from an import row or an existing catalogue entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub death_place: Option<String>,
}

/// Event as read from an import row or an existing catalogue entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

const PERSON_ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "person_id"]),
    ("first_name", &["first_name", "firstname", "given_name", "forename", "first"]),
    ("last_name", &["last_name", "lastname", "surname", "family_name", "last"]),
    ("birth_date", &["birth_date", "date_of_birth", "birthdate", "born", "dob"]),
    ("death_date", &["death_date", "date_of_death", "deathdate", "died", "dod"]),
    ("birth_place", &["birth_place", "place_of_birth", "birthplace"]),
    ("death_place", &["death_place", "place_of_death", "deathplace"]),
];

const EVENT_ALIASES: &[(&str, &[&str])] = &[
    ("id", &["id", "event_id"]),
    ("title", &["title", "name", "event", "event_title"]),
    ("description", &["description", "details", "summary"]),
    ("start_date", &["start_date", "date", "start", "begin_date"]),
    ("end_date", &["end_date", "end", "finish_date"]),
    ("location", &["location", "place", "venue"]),
];

/// Fold a header to its lookup key: lowercase, spaces and dashes as underscores
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Row re-keyed by normalized header
struct NormalizedRow(HashMap<String, String>);

impl NormalizedRow {
    /// Headers that fold to the same key keep the first non-blank value,
    /// taking the original headers in sorted order
    fn new(row: &Row) -> Self {
        let mut headers: Vec<(&String, &String)> = row.iter().collect();
        headers.sort_by(|a, b| a.0.cmp(b.0));

        let mut normalized: HashMap<String, String> = HashMap::with_capacity(headers.len());
        for (key, value) in headers {
            normalized
                .entry(normalize_header(key))
                .and_modify(|current| {
                    if current.trim().is_empty() {
                        *current = value.clone();
                    }
                })
                .or_insert_with(|| value.clone());
        }
        Self(normalized)
    }

    /// First non-blank value among the aliases of `field`
    fn field(&self, aliases: &[(&str, &[&str])], field: &str) -> Option<String> {
        let names = aliases
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, names)| *names)
            .unwrap_or(&[]);

        names.iter().find_map(|name| {
            self.0
                .get(*name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    }
}

impl PersonRecord {
    pub fn from_row(row: &Row) -> Self {
        let row = NormalizedRow::new(row);
        let get = |field: &str| row.field(PERSON_ALIASES, field);
        Self {
            id: get("id"),
            first_name: get("first_name"),
            last_name: get("last_name"),
            birth_date: get("birth_date"),
            death_date: get("death_date"),
            birth_place: get("birth_place"),
            death_place: get("death_place"),
        }
    }

    /// "First Last" for log and report output
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl EventRecord {
    pub fn from_row(row: &Row) -> Self {
        let row = NormalizedRow::new(row);
        let get = |field: &str| row.field(EVENT_ALIASES, field);
        Self {
            id: get("id"),
            title: get("title"),
            description: get("description"),
            start_date: get("start_date"),
            end_date: get("end_date"),
            location: get("location"),
        }
    }
}

/// Non-blank trimmed value of an optional field
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("First Name"), "first_name");
        assert_eq!(normalize_header("  BIRTH-DATE "), "birth_date");
        assert_eq!(normalize_header("place  of   birth"), "place_of_birth");
        assert_eq!(normalize_header("last__name"), "last_name");
    }

    #[test]
    fn test_person_from_row_with_aliases() {
        let person = PersonRecord::from_row(&row(&[
            ("Given Name", "Ada"),
            ("Surname", "Lovelace"),
            ("Born", "1815-12-10"),
            ("Place of Birth", "London"),
            ("Notes", "ignored"),
        ]));

        assert_eq!(person.first_name.as_deref(), Some("Ada"));
        assert_eq!(person.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(person.birth_date.as_deref(), Some("1815-12-10"));
        assert_eq!(person.birth_place.as_deref(), Some("London"));
        assert_eq!(person.death_date, None);
        assert_eq!(person.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_blank_cells_are_absent() {
        let person = PersonRecord::from_row(&row(&[("first_name", "   "), ("last_name", " Doe ")]));
        assert_eq!(person.first_name, None);
        assert_eq!(person.last_name.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_event_from_row() {
        let event = EventRecord::from_row(&row(&[
            ("Name", "Treaty of Versailles"),
            ("Date", "1919-06-28"),
            ("Place", "Versailles"),
        ]));

        assert_eq!(event.title.as_deref(), Some("Treaty of Versailles"));
        assert_eq!(event.start_date.as_deref(), Some("1919-06-28"));
        assert_eq!(event.location.as_deref(), Some("Versailles"));
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_canonical_header_preferred_over_alias() {
        let event = EventRecord::from_row(&row(&[("title", "Real Title"), ("name", "Alias")]));
        assert_eq!(event.title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_colliding_headers_keep_filled_value() {
        for _ in 0..50 {
            let person = PersonRecord::from_row(&row(&[
                ("First Name", "Ada"),
                ("first_name", ""),
                ("FIRST-NAME", "  "),
                ("last_name", "Lovelace"),
            ]));
            assert_eq!(person.first_name.as_deref(), Some("Ada"));
            assert_eq!(person.last_name.as_deref(), Some("Lovelace"));
        }
    }

    #[test]
    fn test_colliding_filled_headers_are_deterministic() {
        // "Born" sorts before "born"
        let person = PersonRecord::from_row(&row(&[("born", "1816"), ("Born", "1815")]));
        assert_eq!(person.birth_date.as_deref(), Some("1815"));
    }

    #[test]
    fn test_record_type_parsing() {
        assert_eq!("person".parse::<RecordType>(), Ok(RecordType::Person));
        assert_eq!(" Events ".parse::<RecordType>(), Ok(RecordType::Event));
        assert!("place".parse::<RecordType>().is_err());
    }
}
