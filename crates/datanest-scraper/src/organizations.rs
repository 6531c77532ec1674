//! Row scraper for the organizations register dump.
//!
//! Column positions are fixed integer offsets; the schema is implicit in the
//! feed and any drift is undetectable here beyond a short row.

use datanest_core::{Dataset, Organization};

use crate::error::ScraperError;
use crate::parse_helpers::{
    escape_text, field, parse_optional_date, parse_required_date,
};

pub const COL_ICO: usize = 0;
pub const COL_LEGAL_FORM: usize = 1;
pub const COL_NAME: usize = 2;
pub const COL_SEAT: usize = 3;
pub const COL_DATE_FROM: usize = 4;
pub const COL_DATE_TO: usize = 5;
pub const COL_SOURCE: usize = 6;

/// Scrapes one organizations row into a typed record.
///
/// # Errors
///
/// Row-level [`ScraperError::MissingColumn`] for a short row,
/// [`ScraperError::Field`] for a missing ICO or an unparseable required
/// date. All other anomalies become scrap notes on the record.
pub fn scrape_row(row: &csv::StringRecord) -> Result<Organization, ScraperError> {
    let mut notes = Vec::new();

    let ico = field(row, COL_ICO)?.trim();
    if ico.is_empty() {
        // Without the registration number there is no stable identity.
        return Err(ScraperError::Field {
            field: "ico",
            reason: "empty".to_owned(),
        });
    }

    let legal_form = field(row, COL_LEGAL_FORM)?.trim().to_owned();
    let name = escape_text(field(row, COL_NAME)?.trim());
    if name.is_empty() {
        notes.push("missing name".to_owned());
    }
    let seat = escape_text(field(row, COL_SEAT)?.trim());

    let date_from = parse_required_date(field(row, COL_DATE_FROM)?, "date from")?;
    let date_to = parse_optional_date(field(row, COL_DATE_TO)?, "date to")?;

    let source = field(row, COL_SOURCE)?.trim().to_owned();

    Ok(Organization {
        global_id: Dataset::Organizations.global_id(ico),
        ico: ico.to_owned(),
        legal_form,
        name,
        seat,
        date_from,
        date_to,
        source,
        notes,
    })
}
