//! Typed records produced by the row scrapers, one variant per data set.
//!
//! Records are value objects: every field is populated by the scraper before
//! the record leaves it, and the `global_id` is a non-optional field, so a
//! record without an identifier cannot be constructed at all. The only
//! append-only mutable part is the scrap-note list, which collects
//! data-quality advisories found while parsing ("missing price",
//! "unknown currency: XYZ"). Notes never block storage.
//!
//! Text fields that end up in XML output (`name`, `seat`, donor names,
//! procurement subject) are escaped by the scraper; serializers write them
//! through as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Data-set discriminator. Its stable string form doubles as the `type`
/// field in the shared search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    Organizations,
    PartyDonations,
    Procurements,
}

impl Dataset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organizations => "organization",
            Self::PartyDonations => "party_donation",
            Self::Procurements => "procurement",
        }
    }

    /// Prefix used when deriving the globally-unique record identifier.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Organizations => "org",
            Self::PartyDonations => "donation",
            Self::Procurements => "procurement",
        }
    }

    /// Derives the globally-unique identifier for a source record:
    /// `"<prefix>_<source id>"`, unique across all data sets.
    #[must_use]
    pub fn global_id(self, source_id: &str) -> String {
        format!("{}_{}", self.id_prefix(), source_id)
    }
}

/// Common surface every harvested record exposes to the orchestrator and
/// the serializers.
pub trait Harvested {
    fn dataset(&self) -> Dataset;
    fn global_id(&self) -> &str;
    /// Data-quality advisories collected during scraping.
    fn notes(&self) -> &[String];
}

/// One row of the organizations register dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub global_id: String,
    /// Company registration number; stable key for the RDF `about` URI.
    pub ico: String,
    pub legal_form: String,
    /// XML-escaped at scrape time.
    pub name: String,
    /// XML-escaped at scrape time.
    pub seat: String,
    pub date_from: NaiveDate,
    /// Unset when the organization still exists; never defaulted.
    pub date_to: Option<NaiveDate>,
    pub source: String,
    pub notes: Vec<String>,
}

impl Harvested for Organization {
    fn dataset(&self) -> Dataset {
        Dataset::Organizations
    }

    fn global_id(&self) -> &str {
        &self.global_id
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// One row of the political-party donations dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDonation {
    pub global_id: String,
    /// XML-escaped at scrape time.
    pub donor_name: String,
    /// XML-escaped at scrape time.
    pub donor_surname: String,
    /// XML-escaped at scrape time. Empty for private donors.
    pub donor_company: String,
    pub donor_ico: String,
    pub gift_value: f64,
    pub gift_currency: Currency,
    pub donor_address: String,
    pub donor_city: String,
    /// XML-escaped at scrape time.
    pub recipient_party: String,
    pub year: String,
    pub accept_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub notes: Vec<String>,
}

impl Harvested for PartyDonation {
    fn dataset(&self) -> Dataset {
        Dataset::PartyDonations
    }

    fn global_id(&self) -> &str {
        &self.global_id
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// One row of the public-procurements dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procurement {
    pub global_id: String,
    pub year: String,
    pub bulletin_id: String,
    /// Stable key for the RDF `about` URI.
    pub procurement_id: String,
    /// XML-escaped at scrape time.
    pub subject: String,
    pub price: f64,
    pub currency: Currency,
    pub vat_included: bool,
    pub customer_ico: String,
    pub supplier_ico: String,
    pub source: String,
    pub notes: Vec<String>,
}

impl Harvested for Procurement {
    fn dataset(&self) -> Dataset {
        Dataset::Procurements
    }

    fn global_id(&self) -> &str {
        &self.global_id
    }

    fn notes(&self) -> &[String] {
        &self.notes
    }
}
