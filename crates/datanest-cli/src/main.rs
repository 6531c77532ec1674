mod harvest;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use datanest_core::AppConfig;
use datanest_scraper::FeedClient;
use datanest_store::{
    FanOut, FsSink, IndexMapped, IndexSerializer, MemoryPrimary, RdfMapped, RdfSerializer,
};

use harvest::datasets::{self, DatasetDescriptor};
use harvest::runner;

#[derive(Debug, Parser)]
#[command(name = "datanest-cli")]
#[command(about = "Open-data harvester: scrape CSV feeds, diff, batch, fan out")]
struct Cli {
    /// Directory where the filesystem sink writes payload batches.
    #[arg(long, default_value = "out", global = true)]
    out: PathBuf,

    /// JSON file holding the previous harvest's documents (an id-to-document
    /// map) for change detection. Without it every record counts as new.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a harvest for one data set.
    Update { dataset: DatasetArg },
    /// Run harvests for every data set sequentially.
    UpdateAll,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DatasetArg {
    Organizations,
    PartyDonations,
    Procurements,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = datanest_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let cli = Cli::parse();
    let client = FeedClient::new(config.fetch_timeout_secs, &config.user_agent)?;
    let sink = FsSink::new(&cli.out)?;
    let primary = load_primary(cli.state.as_deref())?;

    match cli.command {
        Commands::Update { dataset } => {
            run_dataset(dataset, &config, &client, &primary, &sink).await
        }
        Commands::UpdateAll => {
            let mut failed: Vec<&str> = Vec::new();
            for dataset in [
                DatasetArg::Organizations,
                DatasetArg::PartyDonations,
                DatasetArg::Procurements,
            ] {
                if let Err(e) = run_dataset(dataset, &config, &client, &primary, &sink).await {
                    tracing::error!(dataset = dataset.name(), error = %e, "harvest failed");
                    failed.push(dataset.name());
                }
            }
            if failed.is_empty() {
                Ok(())
            } else {
                anyhow::bail!("harvest failed for: {}", failed.join(", "))
            }
        }
    }
}

impl DatasetArg {
    fn name(self) -> &'static str {
        match self {
            Self::Organizations => "organizations",
            Self::PartyDonations => "party-donations",
            Self::Procurements => "procurements",
        }
    }
}

/// Loads the previous harvest's documents for change detection, or an empty
/// primary store when no state file is given.
fn load_primary(state: Option<&std::path::Path>) -> anyhow::Result<MemoryPrimary> {
    let Some(path) = state else {
        return Ok(MemoryPrimary::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read state file {}: {e}", path.display()))?;
    let docs: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("state file {} is not an id-to-document map: {e}", path.display()))?;
    tracing::info!(path = %path.display(), documents = docs.len(), "loaded previous harvest state");
    Ok(MemoryPrimary::from_docs(docs))
}

async fn run_dataset(
    dataset: DatasetArg,
    config: &AppConfig,
    client: &FeedClient,
    primary: &MemoryPrimary,
    sink: &FsSink,
) -> anyhow::Result<()> {
    match dataset {
        DatasetArg::Organizations => {
            run_one(config, client, &datasets::organizations(config), primary, sink).await
        }
        DatasetArg::PartyDonations => {
            run_one(config, client, &datasets::party_donations(config), primary, sink).await
        }
        DatasetArg::Procurements => {
            run_one(config, client, &datasets::procurements(config), primary, sink).await
        }
    }
}

async fn run_one<R>(
    config: &AppConfig,
    client: &FeedClient,
    descriptor: &DatasetDescriptor<R>,
    primary: &MemoryPrimary,
    sink: &FsSink,
) -> anyhow::Result<()>
where
    R: RdfMapped + IndexMapped + 'static,
{
    let fanout: FanOut<R> = FanOut::new()
        .register(Box::new(RdfSerializer::new(descriptor.rdf_base_uri)))
        .register(Box::new(IndexSerializer::new(descriptor.index_name)));

    let totals = runner::run_harvest(
        client,
        descriptor,
        &fanout,
        primary,
        sink,
        config.batch_size,
        config.debug_row_limit,
    )
    .await?;

    println!(
        "{}: {} rows ({} skipped), {} new, {} unchanged, {} batches in {:.1}s ({:.0} rows/s)",
        descriptor.dataset.as_str(),
        totals.rows,
        totals.skipped,
        totals.unchanged,
        totals.new_records,
        totals.batches,
        totals.elapsed.as_secs_f64(),
        totals.rows_per_sec(),
    );
    Ok(())
}
