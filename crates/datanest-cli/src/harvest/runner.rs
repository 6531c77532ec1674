//! The generic harvest run loop.
//!
//! State machine per run: download the feed to a scratch copy, then a
//! sequential scrape/classify/batch loop, flushing through the serializer
//! fan-out whenever the batch fills, with a final flush at end of input.
//! Row-level parse errors are logged and skipped; everything else aborts
//! the run. Batches already flushed stay persisted on abort — at-least-once
//! across the run, no rollback.

use std::time::{Duration, Instant};

use datanest_core::Harvested;
use datanest_scraper::{open_feed, FeedClient};
use datanest_store::{FanOut, IndexMapped, PayloadSink, PrimaryStore};

use super::datasets::DatasetDescriptor;
use super::diff::{self, ChangeStatus};
use super::HarvestError;

/// Counters reported at the end of a run.
#[derive(Debug, Default)]
pub struct RunTotals {
    /// Rows read from the feed, header excluded.
    pub rows: u64,
    /// Rows skipped because of a row-level parse error.
    pub skipped: u64,
    pub unchanged: u64,
    pub new_records: u64,
    pub batches: u64,
    pub elapsed: Duration,
}

impl RunTotals {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

/// Runs one harvest for one data set.
///
/// `debug_row_limit` of `0` disables the dry-run cutoff.
///
/// # Errors
///
/// - [`HarvestError::Fetch`] — the feed could not be downloaded or opened;
///   nothing was stored.
/// - [`HarvestError::Csv`] — the reader failed mid-stream.
/// - [`HarvestError::Repository`] — a primary-store lookup failed.
/// - [`HarvestError::Store`] — a batch flush failed; earlier batches stay
///   persisted.
/// - [`HarvestError::UpdatedUnsupported`] — a stored record changed
///   upstream.
pub async fn run_harvest<R, P, S>(
    client: &FeedClient,
    descriptor: &DatasetDescriptor<R>,
    fanout: &FanOut<R>,
    primary: &P,
    sink: &S,
    batch_size: usize,
    debug_row_limit: usize,
) -> Result<RunTotals, HarvestError>
where
    R: Harvested + IndexMapped,
    P: PrimaryStore + Sync,
    S: PayloadSink + Sync,
{
    let dataset = descriptor.dataset.as_str();
    let started = Instant::now();
    tracing::info!(dataset, url = %descriptor.feed_url, "starting harvest run");

    let scratch = client
        .download(&descriptor.feed_url)
        .await
        .map_err(HarvestError::Fetch)?;
    let mut reader = open_feed(scratch.path()).map_err(HarvestError::Fetch)?;

    let batch_size = batch_size.max(1);
    let mut batch: Vec<R> = Vec::with_capacity(batch_size);
    let mut totals = RunTotals::default();

    for row in reader.records() {
        if debug_row_limit > 0 && totals.rows >= debug_row_limit as u64 {
            tracing::info!(dataset, limit = debug_row_limit, "debug row limit reached");
            break;
        }
        let row = row?;
        totals.rows += 1;

        let record = match (descriptor.scrape)(&row) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(dataset, row = totals.rows, error = %e, "skipping unparseable row");
                totals.skipped += 1;
                continue;
            }
        };
        for note in record.notes() {
            tracing::debug!(dataset, id = record.global_id(), note, "scrap note");
        }

        let doc = record.index_doc();
        match diff::classify(primary, record.global_id(), &doc).await? {
            ChangeStatus::Unchanged => totals.unchanged += 1,
            ChangeStatus::New => {
                batch.push(record);
                totals.new_records += 1;
                if batch.len() >= batch_size {
                    fanout.store_batch(sink, &batch).await?;
                    totals.batches += 1;
                    batch.clear();
                }
            }
            ChangeStatus::Updated => {
                return Err(HarvestError::UpdatedUnsupported {
                    id: record.global_id().to_owned(),
                });
            }
        }
    }

    // Never flush an empty batch.
    if !batch.is_empty() {
        fanout.store_batch(sink, &batch).await?;
        totals.batches += 1;
    }

    totals.elapsed = started.elapsed();
    tracing::info!(
        dataset,
        rows = totals.rows,
        skipped = totals.skipped,
        unchanged = totals.unchanged,
        new = totals.new_records,
        batches = totals.batches,
        elapsed_secs = totals.elapsed.as_secs_f64(),
        rows_per_sec = totals.rows_per_sec(),
        "harvest run complete"
    );
    Ok(totals)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
