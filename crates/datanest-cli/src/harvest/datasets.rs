//! Per-dataset harvest descriptors.
//!
//! One generic runner consumes these instead of one harvester per data set;
//! everything dataset-specific — feed URL, id prefix, column mapping (via
//! the scrape function), RDF base URI — lives in the descriptor.

use datanest_core::{AppConfig, Dataset, Organization, PartyDonation, Procurement};
use datanest_scraper::ScraperError;

pub const ORGANIZATIONS_BASE_URI: &str = "http://opendata.sk/dataset/organizations/";
pub const PARTY_DONATIONS_BASE_URI: &str =
    "http://opendata.sk/dataset/political-party-donations/";
pub const PROCUREMENTS_BASE_URI: &str = "http://opendata.sk/dataset/procurements/";

/// The single search index shared by all data sets; documents are told
/// apart by their `type` field.
pub const INDEX_NAME: &str = "datanest";

/// Everything the generic runner needs to harvest one data set.
pub struct DatasetDescriptor<R> {
    pub dataset: Dataset,
    pub feed_url: String,
    pub rdf_base_uri: &'static str,
    pub index_name: &'static str,
    pub scrape: fn(&csv::StringRecord) -> Result<R, ScraperError>,
}

#[must_use]
pub fn organizations(config: &AppConfig) -> DatasetDescriptor<Organization> {
    DatasetDescriptor {
        dataset: Dataset::Organizations,
        feed_url: config.organizations_feed_url.clone(),
        rdf_base_uri: ORGANIZATIONS_BASE_URI,
        index_name: INDEX_NAME,
        scrape: datanest_scraper::organizations::scrape_row,
    }
}

#[must_use]
pub fn party_donations(config: &AppConfig) -> DatasetDescriptor<PartyDonation> {
    DatasetDescriptor {
        dataset: Dataset::PartyDonations,
        feed_url: config.party_donations_feed_url.clone(),
        rdf_base_uri: PARTY_DONATIONS_BASE_URI,
        index_name: INDEX_NAME,
        scrape: datanest_scraper::donations::scrape_row,
    }
}

#[must_use]
pub fn procurements(config: &AppConfig) -> DatasetDescriptor<Procurement> {
    DatasetDescriptor {
        dataset: Dataset::Procurements,
        feed_url: config.procurements_feed_url.clone(),
        rdf_base_uri: PROCUREMENTS_BASE_URI,
        index_name: INDEX_NAME,
        scrape: datanest_scraper::procurements::scrape_row,
    }
}
