//! Runtime configuration for the harvester, loaded from environment
//! variables by [`crate::config`].

/// Application configuration shared by every harvest run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Tracing filter directive (e.g. `"info"`, `"datanest=debug"`).
    pub log_level: String,
    /// Descriptive client identifier sent on every feed request.
    pub user_agent: String,
    /// Request timeout for feed downloads, in seconds.
    pub fetch_timeout_secs: u64,
    /// Number of new records accumulated before a batch is flushed to the
    /// serializer fan-out.
    pub batch_size: usize,
    /// Stop a run after this many rows. `0` disables the cutoff; non-zero
    /// values are for dry runs against huge feeds.
    pub debug_row_limit: usize,
    pub organizations_feed_url: String,
    pub party_donations_feed_url: String,
    pub procurements_feed_url: String,
}
