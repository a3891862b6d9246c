use std::path::PathBuf;

/// Runtime configuration for a scrape run, sourced from environment
/// variables. See [`crate::config::load_app_config_from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listing page to scrape.
    pub source_url: String,
    /// Path to the reference country table (JSON).
    pub countries_path: PathBuf,
    /// Path the final provider list is written to.
    pub output_path: PathBuf,
    pub log_level: String,
    /// Timeout for the single listing-page fetch.
    pub fetch_timeout_secs: u64,
    /// Per-probe timeout during redirect resolution.
    pub resolve_timeout_secs: u64,
    /// Width of the redirect-resolution worker pool.
    pub resolve_workers: usize,
    pub user_agent: String,
}
