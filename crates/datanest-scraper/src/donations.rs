//! Row scraper for the political-party donations dump.

use datanest_core::{Dataset, PartyDonation};

use crate::error::ScraperError;
use crate::parse_helpers::{
    escape_text, field, parse_amount, parse_currency_lenient, parse_optional_date,
};

pub const COL_ID: usize = 0;
pub const COL_DONOR_NAME: usize = 1;
pub const COL_DONOR_SURNAME: usize = 2;
pub const COL_DONOR_COMPANY: usize = 3;
pub const COL_DONOR_ICO: usize = 4;
pub const COL_GIFT_VALUE: usize = 5;
pub const COL_GIFT_CURRENCY: usize = 6;
pub const COL_DONOR_ADDRESS: usize = 7;
pub const COL_DONOR_CITY: usize = 8;
pub const COL_RECIPIENT_PARTY: usize = 9;
pub const COL_YEAR: usize = 10;
pub const COL_ACCEPT_DATE: usize = 11;
pub const COL_NOTE: usize = 12;

/// Scrapes one donations row into a typed record.
///
/// The feed's own record id (column 0) is the only stable identity a
/// donation has, so it drives the global id.
///
/// # Errors
///
/// Row-level [`ScraperError::MissingColumn`] for a short row,
/// [`ScraperError::Field`] for a missing record id, an unparseable gift
/// value, or an unparseable accept date. Empty gift value and empty or
/// unrecognized currency become scrap notes.
pub fn scrape_row(row: &csv::StringRecord) -> Result<PartyDonation, ScraperError> {
    let mut notes = Vec::new();

    let id = field(row, COL_ID)?.trim();
    if id.is_empty() {
        return Err(ScraperError::Field {
            field: "donation id",
            reason: "empty".to_owned(),
        });
    }

    let donor_name = escape_text(field(row, COL_DONOR_NAME)?.trim());
    let donor_surname = escape_text(field(row, COL_DONOR_SURNAME)?.trim());
    let donor_company = escape_text(field(row, COL_DONOR_COMPANY)?.trim());
    if donor_name.is_empty() && donor_surname.is_empty() && donor_company.is_empty() {
        notes.push("missing donor".to_owned());
    }
    let donor_ico = field(row, COL_DONOR_ICO)?.trim().to_owned();

    let gift_value = parse_amount(field(row, COL_GIFT_VALUE)?, "gift value", &mut notes)?;
    let gift_currency =
        parse_currency_lenient(field(row, COL_GIFT_CURRENCY)?, "missing currency", &mut notes);

    let donor_address = field(row, COL_DONOR_ADDRESS)?.trim().to_owned();
    let donor_city = field(row, COL_DONOR_CITY)?.trim().to_owned();

    let recipient_party = escape_text(field(row, COL_RECIPIENT_PARTY)?.trim());
    if recipient_party.is_empty() {
        notes.push("missing recipient party".to_owned());
    }
    let year = field(row, COL_YEAR)?.trim().to_owned();

    let accept_date = parse_optional_date(field(row, COL_ACCEPT_DATE)?, "accept date")?;

    let note_cell = field(row, COL_NOTE)?.trim();
    let note = if note_cell.is_empty() {
        None
    } else {
        Some(escape_text(note_cell))
    };

    Ok(PartyDonation {
        global_id: Dataset::PartyDonations.global_id(id),
        donor_name,
        donor_surname,
        donor_company,
        donor_ico,
        gift_value,
        gift_currency,
        donor_address,
        donor_city,
        recipient_party,
        year,
        accept_date,
        note,
        notes,
    })
}
