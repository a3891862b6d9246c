pub mod app_config;
pub mod config;
pub mod countries;
pub mod providers;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::load_app_config_from_env;
pub use countries::{CountriesError, CountryEntry, CountryTable};
pub use providers::{Category, Coordinate, Provider, RawEntry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
