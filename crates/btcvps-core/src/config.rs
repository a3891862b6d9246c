use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables already in the
/// process. `.env` loading is the binary's concern, before this is called.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value. Every
/// variable has a default, so an empty environment is valid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let source_url = or_default("BTCVPS_SOURCE_URL", "https://bitcoin-vps.com/");
    let countries_path = PathBuf::from(or_default(
        "BTCVPS_COUNTRIES_PATH",
        "./config/countries.json",
    ));
    let output_path = PathBuf::from(or_default("BTCVPS_OUTPUT_PATH", "./data/providers.json"));
    let log_level = or_default("BTCVPS_LOG_LEVEL", "info");

    let fetch_timeout_secs = parse_u64("BTCVPS_FETCH_TIMEOUT_SECS", "30")?;
    let resolve_timeout_secs = parse_u64("BTCVPS_RESOLVE_TIMEOUT_SECS", "10")?;
    let resolve_workers = parse_usize("BTCVPS_RESOLVE_WORKERS", "20")?;
    let user_agent = or_default("BTCVPS_USER_AGENT", "btcvps-scraper/0.1 (provider-directory)");

    Ok(AppConfig {
        source_url,
        countries_path,
        output_path,
        log_level,
        fetch_timeout_secs,
        resolve_timeout_secs,
        resolve_workers,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
