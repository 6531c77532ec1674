//! Field-level parsing primitives shared by the per-dataset row scrapers.
//!
//! The policy split lives here: a required date or a non-empty unparseable
//! number is a row-level error (the orchestrator skips the row); an empty
//! numeric or currency cell is a recoverable anomaly recorded as a scrap
//! note on the record.

use chrono::NaiveDate;
use datanest_core::Currency;

use crate::error::ScraperError;

/// The single date format used by every feed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the cell at `index`, or a row-level `MissingColumn` error.
///
/// # Errors
///
/// Returns [`ScraperError::MissingColumn`] when the row is shorter than
/// `index + 1` columns (schema drift is undetectable at this layer; a short
/// row is all we can observe).
pub fn field<'r>(row: &'r csv::StringRecord, index: usize) -> Result<&'r str, ScraperError> {
    row.get(index)
        .ok_or(ScraperError::MissingColumn { index })
}

/// Parses a required `yyyy-MM-dd` date.
///
/// # Errors
///
/// Returns a row-level [`ScraperError::Field`] when the cell is empty or
/// does not match the format.
pub fn parse_required_date(raw: &str, name: &'static str) -> Result<NaiveDate, ScraperError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ScraperError::Field {
        field: name,
        reason: e.to_string(),
    })
}

/// Parses an optional `yyyy-MM-dd` date; an empty cell is `None`, never a
/// default date.
///
/// # Errors
///
/// Returns a row-level [`ScraperError::Field`] when a non-empty cell does
/// not match the format.
pub fn parse_optional_date(
    raw: &str,
    name: &'static str,
) -> Result<Option<NaiveDate>, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_required_date(trimmed, name).map(Some)
}

/// Parses a numeric amount cell.
///
/// An empty cell yields `0.0` plus a `"missing <name>"` scrap note — the
/// upstream dumps are known to contain legitimately empty numeric cells.
///
/// # Errors
///
/// Returns a row-level [`ScraperError::Field`] for a non-empty cell that is
/// not a number.
pub fn parse_amount(
    raw: &str,
    name: &'static str,
    notes: &mut Vec<String>,
) -> Result<f64, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        notes.push(format!("missing {name}"));
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|e| ScraperError::Field {
        field: name,
        reason: e.to_string(),
    })
}

/// Parses a currency cell leniently.
///
/// An empty cell resolves to `Undefined` with `empty_note` attached; an
/// unrecognized non-empty cell is downgraded from the enum parser's hard
/// error to an `"unknown currency: <s>"` note plus `Undefined`. Neither case
/// aborts the row.
pub fn parse_currency_lenient(raw: &str, empty_note: &str, notes: &mut Vec<String>) -> Currency {
    if raw.trim().is_empty() {
        notes.push(empty_note.to_owned());
        return Currency::Undefined;
    }
    match Currency::parse(raw) {
        Ok(currency) => currency,
        Err(e) => {
            notes.push(e.to_string());
            Currency::Undefined
        }
    }
}

/// Parses a boolean flag cell (`true`/`1`/`yes`, case-insensitive).
/// Anything else, including an empty cell, is `false`.
#[must_use]
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Escapes XML/HTML-unsafe characters at scrape time so downstream
/// serializers can write the value through without further escaping.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
