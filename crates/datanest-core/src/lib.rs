pub mod app_config;
pub mod config;
pub mod currency;
pub mod error;
pub mod records;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use currency::{Currency, CurrencyError};
pub use error::ConfigError;
pub use records::{Dataset, Harvested, Organization, PartyDonation, Procurement};
