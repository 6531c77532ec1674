use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datanest_core::{AppConfig, Organization};
use datanest_scraper::FeedClient;
use datanest_store::{
    FanOut, IndexMapped, IndexSerializer, MemoryPrimary, MemorySink, PayloadFormat, RdfSerializer,
};

use super::super::datasets::{self, DatasetDescriptor};
use super::super::HarvestError;
use super::*;

/// Two clean rows plus one with an unparseable required date.
const ORG_FEED: &str = "\
ico,legal_form,name,seat,date_from,date_to,source
17321204,2,Test Name,\"Testovacia 1, Bratislava\",1991-07-17,2011-12-06,http://www.test.sk/test1
36677281,1,Druhá firma,Košice,2001-01-05,,http://www.test.sk/test2
99999999,1,Broken,Nitra,not-a-date,,http://www.test.sk/test3
";

fn test_config(feed_url: String) -> AppConfig {
    AppConfig {
        log_level: "info".to_owned(),
        user_agent: "datanest-test/0.1".to_owned(),
        fetch_timeout_secs: 5,
        batch_size: 500,
        debug_row_limit: 0,
        organizations_feed_url: feed_url.clone(),
        party_donations_feed_url: feed_url.clone(),
        procurements_feed_url: feed_url,
    }
}

async fn org_feed_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organisations.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORG_FEED))
        .mount(&server)
        .await;
    server
}

fn org_descriptor(server: &MockServer) -> DatasetDescriptor<Organization> {
    let config = test_config(format!("{}/organisations.csv", server.uri()));
    datasets::organizations(&config)
}

fn org_fanout() -> FanOut<Organization> {
    FanOut::new()
        .register(Box::new(RdfSerializer::new(
            datasets::ORGANIZATIONS_BASE_URI,
        )))
        .register(Box::new(IndexSerializer::new(datasets::INDEX_NAME)))
}

fn test_client() -> FeedClient {
    FeedClient::new(5, "datanest-test/0.1").expect("failed to build test FeedClient")
}

/// Index documents of the good feed rows, keyed by global id, as the
/// previous harvest would have stored them.
fn previously_stored_docs() -> Vec<(String, serde_json::Value)> {
    let rows = [
        vec![
            "17321204",
            "2",
            "Test Name",
            "Testovacia 1, Bratislava",
            "1991-07-17",
            "2011-12-06",
            "http://www.test.sk/test1",
        ],
        vec![
            "36677281",
            "1",
            "Druhá firma",
            "Košice",
            "2001-01-05",
            "",
            "http://www.test.sk/test2",
        ],
    ];
    rows.into_iter()
        .map(|cells| {
            let record = datanest_scraper::organizations::scrape_row(
                &csv::StringRecord::from(cells),
            )
            .expect("fixture row scrapes");
            (record.global_id.clone(), record.index_doc())
        })
        .collect()
}

#[tokio::test]
async fn fresh_harvest_stores_new_rows_and_skips_broken_ones() {
    let server = org_feed_server().await;
    let primary = MemoryPrimary::default();
    let sink = MemorySink::default();

    let totals = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        500,
        0,
    )
    .await
    .expect("run should succeed");

    assert_eq!(totals.rows, 3);
    assert_eq!(totals.skipped, 1);
    assert_eq!(totals.new_records, 2);
    assert_eq!(totals.unchanged, 0);
    assert_eq!(totals.batches, 1);

    // One batch fanned out to rdf (primary + combined) and index.
    let stored = sink.stored();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].format, PayloadFormat::RdfXml);
    assert_eq!(stored[2].format, PayloadFormat::IndexJson);
    let docs: Vec<serde_json::Value> = serde_json::from_str(&stored[2].body).unwrap();
    assert_eq!(docs.len(), 2);
}

#[tokio::test]
async fn batch_boundary_flushes_mid_run_and_at_end_of_stream() {
    let server = org_feed_server().await;
    let primary = MemoryPrimary::default();
    let sink = MemorySink::default();

    let totals = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        1,
        0,
    )
    .await
    .expect("run should succeed");

    // Two new records with batch_size 1: one mid-run flush, one final.
    assert_eq!(totals.batches, 2);
    assert_eq!(sink.stored().len(), 6);
}

#[tokio::test]
async fn rerun_against_unchanged_source_is_idempotent() {
    let server = org_feed_server().await;
    let primary = MemoryPrimary::default();
    for (id, doc) in previously_stored_docs() {
        primary.insert(id, doc);
    }
    let sink = MemorySink::default();

    let totals = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        500,
        0,
    )
    .await
    .expect("run should succeed");

    // All parseable rows are unchanged; nothing is flushed.
    assert_eq!(totals.new_records, 0);
    assert_eq!(totals.unchanged, 2);
    assert_eq!(totals.batches, 0);
    assert!(sink.stored().is_empty());
}

#[tokio::test]
async fn updated_record_is_run_fatal() {
    let server = org_feed_server().await;
    let primary = MemoryPrimary::default();
    let mut docs = previously_stored_docs();
    docs[0].1["name"] = serde_json::Value::String("Old Name".to_owned());
    for (id, doc) in docs {
        primary.insert(id, doc);
    }
    let sink = MemorySink::default();

    let err = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        500,
        0,
    )
    .await
    .expect_err("updated record must abort the run");

    assert!(
        matches!(err, HarvestError::UpdatedUnsupported { ref id } if id == "org_17321204"),
        "expected UpdatedUnsupported(org_17321204), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_failure_aborts_with_no_partial_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organisations.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let primary = MemoryPrimary::default();
    let sink = MemorySink::default();

    let err = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        500,
        0,
    )
    .await
    .expect_err("404 must fail the run");

    assert!(matches!(err, HarvestError::Fetch(_)), "got: {err:?}");
    assert!(sink.stored().is_empty());
}

#[tokio::test]
async fn debug_row_limit_cuts_the_run_short() {
    let server = org_feed_server().await;
    let primary = MemoryPrimary::default();
    let sink = MemorySink::default();

    let totals = run_harvest(
        &test_client(),
        &org_descriptor(&server),
        &org_fanout(),
        &primary,
        &sink,
        500,
        1,
    )
    .await
    .expect("run should succeed");

    assert_eq!(totals.rows, 1);
    assert_eq!(totals.new_records, 1);
    // The partial batch is still flushed.
    assert_eq!(totals.batches, 1);
}
