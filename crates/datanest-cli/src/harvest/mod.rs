//! Harvest orchestration: dataset descriptors, change detection, and the
//! generic run loop.

pub mod datasets;
pub mod diff;
pub mod runner;

use thiserror::Error;

use datanest_scraper::ScraperError;
use datanest_store::{RepositoryError, StoreError};

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Source acquisition failed before any row was processed. The run
    /// aborts cleanly with no partial state.
    #[error("feed acquisition failed: {0}")]
    Fetch(#[source] ScraperError),

    /// The reader failed mid-stream. Unlike a row-level parse problem this
    /// is run-fatal: the rest of the feed cannot be trusted.
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Primary-store lookup failed while diffing.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The stored copy differs from the fresh scrape. There is no
    /// supersession path for the old copy yet, so this is surfaced loudly
    /// instead of guessing an upsert strategy.
    #[error("record {id} changed upstream; supersession of the stored copy is not implemented")]
    UpdatedUnsupported { id: String },
}
