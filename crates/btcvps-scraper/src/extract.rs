//! Record extraction from a single directory list item.
//!
//! A provider entry is free prose wrapped in a list item, e.g.:
//!
//! ```text
//! Example Host Locations: Germany, USA (US). Company registered in Panama.
//! Accepts BTC and Lightning Network payments.
//! ```
//!
//! The `Location(s):` marker is the structural signal separating provider
//! entries from incidental list items; anything without it (or without an
//! anchor to take the name and URL from) is rejected, not an error.

use btcvps_core::{Category, CountryTable, RawEntry};
use regex::Regex;

use crate::blocks::ListItem;
use crate::geocode::{clean_label, geocode, split_tokens};
use crate::patterns::Patterns;

/// Hard cap on stored description length, including the ellipsis.
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Extracts one [`RawEntry`] from a list item, or nothing when the item is
/// not a provider entry. Pure function of its inputs plus the shared country
/// table.
#[must_use]
pub fn extract_entry(
    item: &ListItem,
    category: Category,
    patterns: &Patterns,
    countries: &CountryTable,
) -> Option<RawEntry> {
    let anchor = item.anchor.as_ref()?;
    let text = item.text.as_str();

    if !text.contains("Locations:") && !text.contains("Location:") {
        return None;
    }

    let locations_str = locations_segment(text);
    let locations: Vec<String> = split_tokens(&locations_str)
        .iter()
        .map(|token| clean_label(token))
        .filter(|label| !label.is_empty())
        .collect();

    Some(RawEntry {
        name: anchor.text.clone(),
        url: anchor.href.clone(),
        category,
        coordinates: geocode(&locations_str, countries),
        locations,
        company_country: company_segment(text),
        payments: patterns.payments(text),
        features: patterns.features(text),
        tor_friendly: patterns.tor_friendly(text),
        description: description_segment(text),
    })
}

/// The text after `Location(s):` up to `". Company"`, `". "` followed by an
/// uppercase letter, or end of string. Trailing periods stripped.
fn locations_segment(text: &str) -> String {
    let re = Regex::new(r"Locations?:\s*(.+?)(?:\.\s*Company|\.\s*[A-Z]|\.\s*$|$)")
        .expect("valid locations regex");
    re.captures(text)
        .map(|c| c[1].trim().trim_end_matches('.').trim().to_owned())
        .unwrap_or_default()
}

/// The text after `"Company registered in "` up to the next period.
fn company_segment(text: &str) -> String {
    let re = Regex::new(r"Company registered in\s+([^.]+)").expect("valid company regex");
    re.captures(text)
        .map(|c| c[1].trim().to_owned())
        .unwrap_or_default()
}

/// Everything after the company-registration clause, trimmed and capped.
fn description_segment(text: &str) -> String {
    let re = Regex::new(r"(?s)Company registered in\s+[^.]+\.\s*(.*)")
        .expect("valid description regex");
    let description = re
        .captures(text)
        .map(|c| c[1].trim().to_owned())
        .unwrap_or_default();
    truncate_description(description)
}

/// Caps the description at 500 characters, the last 3 an ellipsis marker.
fn truncate_description(description: String) -> String {
    if description.chars().count() <= DESCRIPTION_MAX_CHARS {
        return description;
    }
    let kept: String = description.chars().take(DESCRIPTION_MAX_CHARS - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
