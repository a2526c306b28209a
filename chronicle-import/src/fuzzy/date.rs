//! Fuzzy Date Parser
//!
//! Converts free-text historical date expressions into a [`FuzzyDate`]: a
//! point date plus a discrete uncertainty level and a confidence score.
//!
//! # Recognition Order
//! Patterns overlap, so the first match wins:
//! 1. Blank input → Unknown
//! 2. `1945-05-08` → Exact
//! 3. `1945` → Approximate, Jan 1
//! 4. `1945?` → Estimated, Jan 1
//! 5. `c. 1890`, `c1890`, `ca. 1890`, `circa 1890` → Approximate, Jan 1
//! 6. `1914-1918` → Approximate, Jan 1 of the start year
//! 7. `Spring 1871` → Approximate, first day of the season's month
//! 8. `before 1900` → Estimated, Dec 31
//! 9. `after 1900` → Estimated, Jan 1
//! 10. `8/5/1945`, `8.5.1945` → Exact, day first
//! 11. Generic formats (`May 8, 1945`, `8 May 1945`, `5/8/1945`, RFC 3339, ...) → Exact
//! 12. Anything else → Unknown
//!
//! Rules 3-9 only accept years inside the configured bounds (1000-2100 by
//! default); out-of-range years fall through to later rules.
//!
//! A year range keeps only its start year. Callers that need the end of the
//! range must keep the original text.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use chronicle_common::config::DateConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").unwrap());
static QUESTIONED_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})\?$").unwrap());
static CIRCA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:circa|ca\.?|c\.?)\s*(\d{4})$").unwrap());
static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})\s*[-–]\s*(\d{4})$").unwrap());
static SEASON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(spring|summer|fall|autumn|winter)\s+(\d{4})$").unwrap()
});
static BEFORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^before\s+(\d{4})$").unwrap());
static AFTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^after\s+(\d{4})$").unwrap());
static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$|^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap()
});

/// Formats tried by the generic fallback, in order
const FALLBACK_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%b. %d, %Y",
    "%d. %B %Y",
];

/// Shared parser with the default bounds and confidences
static DEFAULT_PARSER: Lazy<DateParser> = Lazy::new(DateParser::default);

/// How much the parser had to guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateUncertainty {
    /// A full calendar date was given
    Exact,
    /// Year (or season) recognised, day and month assumed
    Approximate,
    /// Questioned or open-ended ("1890?", "before 1900")
    Estimated,
    /// Nothing recognised
    Unknown,
}

impl DateUncertainty {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateUncertainty::Exact => "EXACT",
            DateUncertainty::Approximate => "APPROXIMATE",
            DateUncertainty::Estimated => "ESTIMATED",
            DateUncertainty::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DateUncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date annotated with its uncertainty
///
/// `date` is `None` exactly when `uncertainty` is `Unknown` and `confidence` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyDate {
    pub date: Option<NaiveDate>,
    pub original: String,
    pub uncertainty: DateUncertainty,
    pub confidence: f64,
}

impl FuzzyDate {
    /// Unparseable input
    pub fn unknown(original: impl Into<String>) -> Self {
        Self {
            date: None,
            original: original.into(),
            uncertainty: DateUncertainty::Unknown,
            confidence: 0.0,
        }
    }

    fn resolved(
        date: NaiveDate,
        original: &str,
        uncertainty: DateUncertainty,
        confidence: f64,
    ) -> Self {
        Self {
            date: Some(date),
            original: original.to_string(),
            uncertainty,
            confidence,
        }
    }

    /// True if a concrete date was recovered
    pub fn is_known(&self) -> bool {
        self.date.is_some()
    }

    pub fn is_exact(&self) -> bool {
        self.uncertainty == DateUncertainty::Exact
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }
}

/// Parse a free-text date using the default configuration
///
/// Never fails: unrecognised input yields an Unknown date with confidence 0.
pub fn parse_fuzzy_date(input: &str) -> FuzzyDate {
    DEFAULT_PARSER.parse(input)
}

/// Fuzzy date parser with configurable year bounds and confidence constants
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    config: DateConfig,
}

impl DateParser {
    pub fn new(config: DateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DateConfig {
        &self.config
    }

    /// Parse a free-text date
    pub fn parse(&self, input: &str) -> FuzzyDate {
        let text = input.trim();
        if text.is_empty() {
            return FuzzyDate::unknown(input);
        }

        let parsed = self.parse_structured(text, input);
        match &parsed {
            Some(date) => trace!(
                input = %input,
                uncertainty = %date.uncertainty,
                confidence = date.confidence,
                "Parsed fuzzy date"
            ),
            None => trace!(input = %input, "Unrecognised date expression"),
        }
        parsed.unwrap_or_else(|| FuzzyDate::unknown(input))
    }

    fn parse_structured(&self, text: &str, original: &str) -> Option<FuzzyDate> {
        let cfg = &self.config;

        if let Some(caps) = ISO_DATE.captures(text) {
            if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Exact,
                    cfg.exact_confidence,
                ));
            }
        }

        if let Some(caps) = YEAR.captures(text) {
            if let Some(date) = self.bounded_year(&caps[1]).and_then(jan_first) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Approximate,
                    cfg.year_confidence,
                ));
            }
        }

        if let Some(caps) = QUESTIONED_YEAR.captures(text) {
            if let Some(date) = self.bounded_year(&caps[1]).and_then(jan_first) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Estimated,
                    cfg.questioned_year_confidence,
                ));
            }
        }

        if let Some(caps) = CIRCA.captures(text) {
            if let Some(date) = self.bounded_year(&caps[1]).and_then(jan_first) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Approximate,
                    cfg.circa_confidence,
                ));
            }
        }

        if let Some(caps) = YEAR_RANGE.captures(text) {
            if let (Some(start), Some(end)) =
                (self.bounded_year(&caps[1]), self.bounded_year(&caps[2]))
            {
                if start <= end {
                    if let Some(date) = jan_first(start) {
                        return Some(FuzzyDate::resolved(
                            date,
                            original,
                            DateUncertainty::Approximate,
                            cfg.range_confidence,
                        ));
                    }
                }
            }
        }

        if let Some(caps) = SEASON.captures(text) {
            let month = season_month(&caps[1]);
            if let Some(date) = self
                .bounded_year(&caps[2])
                .and_then(|year| NaiveDate::from_ymd_opt(year, month, 1))
            {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Approximate,
                    cfg.season_confidence,
                ));
            }
        }

        if let Some(caps) = BEFORE.captures(text) {
            if let Some(date) = self
                .bounded_year(&caps[1])
                .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
            {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Estimated,
                    cfg.before_after_confidence,
                ));
            }
        }

        if let Some(caps) = AFTER.captures(text) {
            if let Some(date) = self.bounded_year(&caps[1]).and_then(jan_first) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Estimated,
                    cfg.before_after_confidence,
                ));
            }
        }

        if let Some(caps) = DAY_MONTH_YEAR.captures(text) {
            // Alternation: groups 1-3 for slashes, 4-6 for dots
            let group = |slash: usize, dot: usize| {
                caps.get(slash)
                    .or_else(|| caps.get(dot))
                    .map(|m| m.as_str())
                    .unwrap_or_default()
            };
            if let Some(date) = ymd(group(3, 6), group(2, 5), group(1, 4)) {
                return Some(FuzzyDate::resolved(
                    date,
                    original,
                    DateUncertainty::Exact,
                    cfg.exact_confidence,
                ));
            }
        }

        parse_generic(text).map(|date| {
            FuzzyDate::resolved(date, original, DateUncertainty::Exact, cfg.exact_confidence)
        })
    }

    fn bounded_year(&self, digits: &str) -> Option<i32> {
        digits
            .parse::<i32>()
            .ok()
            .filter(|year| (self.config.min_year..=self.config.max_year).contains(year))
    }
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn jan_first(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Representative month for a season name (case-insensitive)
fn season_month(season: &str) -> u32 {
    match season.to_lowercase().as_str() {
        "spring" => 3,
        "summer" => 6,
        "fall" | "autumn" => 9,
        _ => 12,
    }
}

/// Generic date-string parsing for common written and machine formats
fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }

    if let Some(date) = FALLBACK_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date);
    }

    // "May 1945" → first of the month
    NaiveDate::parse_from_str(&format!("1 {}", text), "%d %B %Y").ok()
}
