//! End-to-end scrape pipeline: fetch, classify, extract, merge, resolve.

use btcvps_core::{AppConfig, CountryTable, Provider};

use crate::blocks::collect_entries;
use crate::error::ScraperError;
use crate::merge::merge_entries;
use crate::page::{fetch_page, parse_blocks};
use crate::patterns::Patterns;
use crate::resolve::{RedirectResolver, TRACKING_PREFIX};

/// Runs the full pipeline against the configured listing page and returns
/// the merged provider set, in first-seen order.
///
/// With `resolve_links` unset the tracking URLs are passed through as-is,
/// which keeps offline runs (and tests of everything upstream of the
/// resolver) free of per-provider network traffic.
///
/// # Errors
///
/// Fails only on the initial page fetch; individual redirect probes degrade
/// per provider instead of failing the run.
pub async fn run_pipeline(
    config: &AppConfig,
    countries: &CountryTable,
    resolve_links: bool,
) -> Result<Vec<Provider>, ScraperError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(&config.user_agent)
        .build()?;

    let html = fetch_page(&client, &config.source_url).await?;
    let blocks = parse_blocks(&html);
    tracing::info!(blocks = blocks.len(), "parsed listing page");

    let patterns = Patterns::new();
    let entries = collect_entries(&blocks, &patterns, countries);
    tracing::info!(entries = entries.len(), "extracted raw entries");

    let mut providers = merge_entries(entries, countries);
    tracing::info!(providers = providers.len(), "merged providers");

    if resolve_links {
        let resolver = RedirectResolver::new(
            config.resolve_timeout_secs,
            &config.user_agent,
            config.resolve_workers,
        )?;
        resolver.resolve_all(&config.source_url, &mut providers).await;

        let affiliates = providers.iter().filter(|p| p.aff).count();
        let unresolved = providers
            .iter()
            .filter(|p| p.url.contains(TRACKING_PREFIX))
            .count();
        tracing::info!(affiliates, unresolved, "redirect resolution finished");
    }

    Ok(providers)
}
