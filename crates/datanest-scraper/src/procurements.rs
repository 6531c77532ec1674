//! Row scraper for the public-procurements dump.

use datanest_core::{Currency, Dataset, Procurement};

use crate::error::ScraperError;
use crate::parse_helpers::{escape_text, field, parse_amount, parse_flag};

pub const COL_YEAR: usize = 0;
pub const COL_BULLETIN_ID: usize = 1;
pub const COL_PROCUREMENT_ID: usize = 2;
pub const COL_CUSTOMER_ICO: usize = 3;
pub const COL_SUPPLIER_ICO: usize = 4;
pub const COL_SUBJECT: usize = 5;
pub const COL_PRICE: usize = 6;
pub const COL_CURRENCY: usize = 7;
pub const COL_VAT_INCLUDED: usize = 8;
pub const COL_SOURCE: usize = 9;

/// Scrapes one procurements row into a typed record.
///
/// A missing currency on a priced procurement is a distinct, more serious
/// anomaly than a missing currency on a zero-price row, so the note text
/// differs between the two cases.
///
/// # Errors
///
/// Row-level [`ScraperError::MissingColumn`] for a short row,
/// [`ScraperError::Field`] for a missing procurement id or an unparseable
/// non-empty price. Empty price and empty or unrecognized currency become
/// scrap notes.
pub fn scrape_row(row: &csv::StringRecord) -> Result<Procurement, ScraperError> {
    let mut notes = Vec::new();

    let procurement_id = field(row, COL_PROCUREMENT_ID)?.trim();
    if procurement_id.is_empty() {
        return Err(ScraperError::Field {
            field: "procurement id",
            reason: "empty".to_owned(),
        });
    }

    let year = field(row, COL_YEAR)?.trim().to_owned();
    let bulletin_id = field(row, COL_BULLETIN_ID)?.trim().to_owned();
    let customer_ico = field(row, COL_CUSTOMER_ICO)?.trim().to_owned();
    let supplier_ico = field(row, COL_SUPPLIER_ICO)?.trim().to_owned();
    let subject = escape_text(field(row, COL_SUBJECT)?.trim());

    let price = parse_amount(field(row, COL_PRICE)?, "price", &mut notes)?;

    let currency_cell = field(row, COL_CURRENCY)?;
    let currency = if currency_cell.trim().is_empty() {
        if price == 0.0 {
            notes.push("missing currency".to_owned());
        } else {
            notes.push("missing currency for non-zero price".to_owned());
        }
        Currency::Undefined
    } else {
        match Currency::parse(currency_cell) {
            Ok(currency) => currency,
            Err(e) => {
                notes.push(e.to_string());
                Currency::Undefined
            }
        }
    };

    let vat_included = parse_flag(field(row, COL_VAT_INCLUDED)?);
    let source = field(row, COL_SOURCE)?.trim().to_owned();

    Ok(Procurement {
        global_id: Dataset::Procurements.global_id(procurement_id),
        year,
        bulletin_id,
        procurement_id: procurement_id.to_owned(),
        subject,
        price,
        currency,
        vat_included,
        customer_ico,
        supplier_ico,
        source,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> csv::StringRecord {
        csv::StringRecord::from(vec![
            "2011",
            "V-2011/18",
            "2011-1234",
            "00151742",
            "31322832",
            "Rekonštrukcia cesty II/520",
            "125000.50",
            "EUR",
            "true",
            "http://www.uvo.gov.sk/sk/evestnik/2011-1234",
        ])
    }

    #[test]
    fn scrape_row_full_row() {
        let p = scrape_row(&full_row()).unwrap();
        assert_eq!(p.global_id, "procurement_2011-1234");
        assert_eq!(p.procurement_id, "2011-1234");
        assert_eq!(p.price, 125_000.5);
        assert_eq!(p.currency, Currency::Eur);
        assert!(p.vat_included);
        assert_eq!(p.customer_ico, "00151742");
        assert_eq!(p.supplier_ico, "31322832");
        assert!(p.notes.is_empty());
    }

    #[test]
    fn scrape_row_empty_price_and_currency_exact_notes() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_PRICE] = String::new();
        cells[COL_CURRENCY] = String::new();
        let row = csv::StringRecord::from(cells);
        let p = scrape_row(&row).unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.currency, Currency::Undefined);
        // Price is zero, so the "non-zero" variant must NOT appear.
        assert_eq!(
            p.notes,
            vec!["missing price".to_owned(), "missing currency".to_owned()]
        );
    }

    #[test]
    fn scrape_row_missing_currency_with_nonzero_price() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_CURRENCY] = String::new();
        let row = csv::StringRecord::from(cells);
        let p = scrape_row(&row).unwrap();
        assert_eq!(p.currency, Currency::Undefined);
        assert_eq!(
            p.notes,
            vec!["missing currency for non-zero price".to_owned()]
        );
    }

    #[test]
    fn scrape_row_unknown_currency_is_note() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_CURRENCY] = "Dukát".to_owned();
        let row = csv::StringRecord::from(cells);
        let p = scrape_row(&row).unwrap();
        assert_eq!(p.currency, Currency::Undefined);
        assert_eq!(p.notes, vec!["unknown currency: Dukát".to_owned()]);
    }

    #[test]
    fn scrape_row_garbage_price_is_row_error() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_PRICE] = "approx 100k".to_owned();
        let row = csv::StringRecord::from(cells);
        let err = scrape_row(&row).unwrap_err();
        assert!(err.is_row_level());
    }

    #[test]
    fn scrape_row_subject_is_escaped() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_SUBJECT] = "Dodávka <IT> služieb".to_owned();
        let row = csv::StringRecord::from(cells);
        let p = scrape_row(&row).unwrap();
        assert_eq!(p.subject, "Dodávka &lt;IT&gt; služieb");
    }

    #[test]
    fn scrape_row_missing_procurement_id_is_row_error() {
        let mut cells: Vec<String> = full_row().iter().map(str::to_owned).collect();
        cells[COL_PROCUREMENT_ID] = String::new();
        let row = csv::StringRecord::from(cells);
        assert!(scrape_row(&row).is_err());
    }
}
