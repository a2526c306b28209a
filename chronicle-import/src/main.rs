//! chronicle-import - Main entry point
//!
//! Command-line front end for checking historical person/event spreadsheets
//! before import. Every command prints JSON on stdout; logs go to stderr
//! (or the configured log file).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use chronicle_common::config::TomlConfig;
use chronicle_common::logging::init_tracing;
use chronicle_import::duplicates::DuplicateDetector;
use chronicle_import::fuzzy::date::DateParser;
use chronicle_import::fuzzy::name::{name_similarity_with, normalize_name_text};
use chronicle_import::fuzzy::{levenshtein_distance, normalize_person_name, normalize_place_name};
use chronicle_import::reader::read_rows;
use chronicle_import::records::{EventRecord, PersonRecord, RecordType};
use chronicle_import::validators::ImportValidator;

/// Command-line arguments for chronicle-import
#[derive(Parser, Debug)]
#[command(name = "chronicle-import")]
#[command(about = "Fuzzy validation and duplicate detection for historical record imports")]
#[command(version)]
struct Args {
    /// Configuration file (falls back to CHRONICLE_CONFIG, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every row of an import file
    Validate {
        /// Record type held by the file
        #[arg(short = 't', long = "type")]
        record_type: RecordType,

        /// CSV/TSV or spreadsheet file
        file: PathBuf,
    },

    /// Find likely duplicates of incoming records among existing ones
    Duplicates {
        #[arg(short = 't', long = "type")]
        record_type: RecordType,

        /// File holding the existing records
        #[arg(short, long)]
        existing: PathBuf,

        /// Minimum confidence to report (defaults to the configured threshold)
        #[arg(long)]
        threshold: Option<f64>,

        /// File holding the incoming records
        file: PathBuf,
    },

    /// Parse a free-text date
    ParseDate { text: String },

    /// Normalize a place name
    NormalizePlace { text: String },

    /// Compare two personal names
    CompareNames { a: String, b: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NameComparison {
    a: String,
    b: String,
    similarity: f64,
    distance: usize,
    normalized_a: String,
    normalized_b: String,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging).context("Failed to initialize logging")?;

    match args.command {
        Command::Validate { record_type, file } => {
            let rows = read_rows(&file)
                .with_context(|| format!("Failed to read import file {}", file.display()))?;

            let validator = ImportValidator::new(config.dates.clone());
            let report = validator.validate_batch(record_type, &rows);
            print_json(&report)?;

            if !report.all_valid() {
                warn!(invalid = report.invalid_rows, "Import file has invalid rows");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Duplicates {
            record_type,
            existing,
            threshold,
            file,
        } => {
            let detector = DuplicateDetector::new(config.matching.clone(), config.dates.clone());
            let threshold = threshold.unwrap_or(match record_type {
                RecordType::Person => detector.matching().person_threshold,
                RecordType::Event => detector.matching().event_threshold,
            });
            if !(0.0..=1.0).contains(&threshold) {
                anyhow::bail!("Threshold must be between 0 and 1, got {}", threshold);
            }

            info!(
                record_type = %record_type,
                incoming = %file.display(),
                existing = %existing.display(),
                threshold,
                "Running duplicate detection"
            );

            match record_type {
                RecordType::Person => {
                    let incoming = load_records(&file, PersonRecord::from_row)?;
                    let pool = load_records(&existing, PersonRecord::from_row)?;
                    print_json(&detector.detect_batch_person_duplicates(&incoming, &pool, threshold))?;
                }
                RecordType::Event => {
                    let incoming = load_records(&file, EventRecord::from_row)?;
                    let pool = load_records(&existing, EventRecord::from_row)?;
                    print_json(&detector.detect_batch_event_duplicates(&incoming, &pool, threshold))?;
                }
            }
        }
        Command::ParseDate { text } => {
            let parser = DateParser::new(config.dates.clone());
            print_json(&parser.parse(&text))?;
        }
        Command::NormalizePlace { text } => {
            print_json(&normalize_place_name(&text))?;
        }
        Command::CompareNames { a, b } => {
            print_json(&compare_names(a, b, config.matching.nickname_similarity))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Similarity and edit distance, both over case- and whitespace-normalized names
fn compare_names(a: String, b: String, nickname_similarity: f64) -> NameComparison {
    NameComparison {
        similarity: name_similarity_with(&a, &b, nickname_similarity),
        distance: levenshtein_distance(&normalize_name_text(&a), &normalize_name_text(&b)),
        normalized_a: normalize_person_name(&a).normalized,
        normalized_b: normalize_person_name(&b).normalized,
        a,
        b,
    }
}

fn load_records<R>(path: &Path, from_row: fn(&chronicle_import::records::Row) -> R) -> Result<Vec<R>> {
    let rows = read_rows(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(rows.iter().map(from_row).collect())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
