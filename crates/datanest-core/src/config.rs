use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_ORGANIZATIONS_FEED_URL: &str =
    "https://datanest.fair-play.sk/api/datasets/organisations/records.csv";
const DEFAULT_PARTY_DONATIONS_FEED_URL: &str =
    "https://datanest.fair-play.sk/api/datasets/party-donations/records.csv";
const DEFAULT_PROCUREMENTS_FEED_URL: &str =
    "https://datanest.fair-play.sk/api/datasets/procurements/records.csv";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse. Every key has a default,
/// so a missing variable is never an error.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("DATANEST_LOG_LEVEL", "info");
    let user_agent = or_default(
        "DATANEST_USER_AGENT",
        "datanest-harvester/0.1 (open-data sync)",
    );
    let fetch_timeout_secs = parse_u64("DATANEST_FETCH_TIMEOUT_SECS", "30")?;
    let batch_size = parse_usize("DATANEST_BATCH_SIZE", "500")?;
    if batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DATANEST_BATCH_SIZE".to_string(),
            reason: "batch size must be at least 1".to_string(),
        });
    }
    let debug_row_limit = parse_usize("DATANEST_DEBUG_ROW_LIMIT", "0")?;

    let organizations_feed_url = or_default(
        "DATANEST_ORGANIZATIONS_FEED_URL",
        DEFAULT_ORGANIZATIONS_FEED_URL,
    );
    let party_donations_feed_url = or_default(
        "DATANEST_PARTY_DONATIONS_FEED_URL",
        DEFAULT_PARTY_DONATIONS_FEED_URL,
    );
    let procurements_feed_url = or_default(
        "DATANEST_PROCUREMENTS_FEED_URL",
        DEFAULT_PROCUREMENTS_FEED_URL,
    );

    Ok(AppConfig {
        log_level,
        user_agent,
        fetch_timeout_secs,
        batch_size,
        debug_row_limit,
        organizations_feed_url,
        party_donations_feed_url,
        procurements_feed_url,
    })
}
