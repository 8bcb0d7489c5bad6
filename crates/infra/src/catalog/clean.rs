//! Snapshot preparation: turn a raw spreadsheet export into the catalog CSV.
//!
//! - headers become ASCII snake_case (`Prix neuf (en FCFA)` → `prix_neuf_en_fcfa`)
//! - every row is padded or truncated to the header width
//! - known numeric columns are reduced to digits, empty cells become `0`

use std::io::{Read, Write};

use thiserror::Error;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Price column: digits only, empty → `0`.
pub const PRICE_COLUMN: &str = "prix_neuf_en_fcfa";
/// Unit-suffixed columns (`8 GB`): digits only when any digit is present.
pub const UNIT_COLUMNS: [&str; 2] = ["stockages_gb", "ram_gb"];
/// Plain numeric columns: empty → `0`.
pub const NUMERIC_COLUMNS: [&str; 4] = [PRICE_COLUMN, "stockages_gb", "ram_gb", "annee_sortie"];

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("input has no header row")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the cleaner did, for the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub headers: Vec<String>,
    pub rows: usize,
    /// Rows whose width had to be fixed.
    pub resized_rows: usize,
    /// Rows that lost non-empty cells past the header width.
    pub truncated_rows: usize,
    pub duplicate_headers: bool,
    pub numeric_columns: Vec<String>,
}

/// Normalize a header: strip accents, lowercase, drop parentheses, turn any
/// other non-alphanumeric run into a single `_`.
pub fn normalize_header(header: &str) -> String {
    let ascii: String = header
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();

    ascii.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn clean_numeric(column: &str, value: &str) -> String {
    let value = value.trim();
    if column == PRICE_COLUMN {
        let digits = digits_only(value);
        return if digits.is_empty() { "0".to_string() } else { digits };
    }
    if UNIT_COLUMNS.contains(&column) {
        let digits = digits_only(value);
        if !digits.is_empty() {
            return digits;
        }
    }
    if value.is_empty() {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Clean `input` into `output`.
pub fn clean_csv<R: Read, W: Write>(input: R, output: W) -> Result<CleanReport, CleanError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::Writer::from_writer(output);

    let mut rows = reader.records();
    let raw_headers = match rows.next() {
        Some(r) => r?,
        None => return Err(CleanError::EmptyInput),
    };

    let headers: Vec<String> = raw_headers.iter().map(normalize_header).collect();
    let mut report = CleanReport {
        duplicate_headers: {
            let mut seen = std::collections::HashSet::new();
            !headers.iter().all(|h| seen.insert(h.as_str()))
        },
        numeric_columns: headers
            .iter()
            .filter(|h| NUMERIC_COLUMNS.contains(&h.as_str()))
            .cloned()
            .collect(),
        ..CleanReport::default()
    };
    if report.duplicate_headers {
        tracing::warn!(?headers, "duplicate headers after normalization");
    }
    writer.write_record(&headers)?;

    let width = headers.len();
    for (i, result) in rows.enumerate() {
        let record = result?;
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();

        if cells.len() != width {
            report.resized_rows += 1;
            if cells.len() > width && cells[width..].iter().any(|c| !c.trim().is_empty()) {
                report.truncated_rows += 1;
                tracing::warn!(line = i + 2, lost = ?&cells[width..], "data lost in extra columns");
            }
            cells.resize(width, String::new());
        }

        for (cell, header) in cells.iter_mut().zip(&headers) {
            if NUMERIC_COLUMNS.contains(&header.as_str()) {
                *cell = clean_numeric(header, cell);
            }
        }

        writer.write_record(&cells)?;
        report.rows += 1;
    }

    writer.flush()?;
    report.headers = headers;
    Ok(report)
}
