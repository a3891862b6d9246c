//! Scrape command handler.
//!
//! Called from `main` after config and logging are established. The handler
//! loads the country reference table, runs the pipeline, writes the dataset,
//! and prints a per-category summary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use btcvps_core::{AppConfig, CountryTable, Provider};

pub(crate) async fn run_scrape(
    config: &AppConfig,
    output: Option<PathBuf>,
    skip_resolve: bool,
) -> anyhow::Result<()> {
    let countries = CountryTable::load(&config.countries_path)?;
    tracing::info!(
        path = %config.countries_path.display(),
        entries = countries.len(),
        "loaded country reference table"
    );

    let providers = btcvps_scraper::run_pipeline(config, &countries, !skip_resolve).await?;
    if providers.is_empty() {
        anyhow::bail!("no providers extracted — listing page layout may have changed");
    }

    let output_path = output.unwrap_or_else(|| config.output_path.clone());
    write_providers(&output_path, &providers)?;
    log_summary(&providers);

    println!(
        "wrote {} providers to {}",
        providers.len(),
        output_path.display()
    );

    Ok(())
}

/// Serializes the provider set as pretty-printed JSON, creating parent
/// directories as needed.
fn write_providers(path: &Path, providers: &[Provider]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(providers)?;
    std::fs::write(path, json)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(())
}

fn log_summary(providers: &[Provider]) {
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_region: BTreeMap<&str, usize> = BTreeMap::new();
    for provider in providers {
        for category in &provider.categories {
            *by_category.entry(category.as_str()).or_default() += 1;
        }
        for region in &provider.regions {
            *by_region.entry(region).or_default() += 1;
        }
    }

    let with_coordinates = providers
        .iter()
        .filter(|p| !p.coordinates.is_empty())
        .count();

    tracing::info!(
        total = providers.len(),
        with_coordinates,
        affiliates = providers.iter().filter(|p| p.aff).count(),
        "scrape complete"
    );
    for (category, count) in &by_category {
        tracing::info!(category, count, "category total");
    }
    for (region, count) in &by_region {
        tracing::info!(region, count, "region total");
    }
}
