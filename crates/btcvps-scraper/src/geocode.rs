//! Best-effort geocoding of free-text location strings.
//!
//! Unmatched tokens are silently dropped: the geocoder enriches entries, it
//! does not validate them.

use std::collections::HashSet;

use regex::Regex;

use btcvps_core::{Coordinate, CountryTable};

/// Splits a raw locations string into trimmed tokens on `,` `;` `/` `&` or
/// the standalone word `and`.
pub(crate) fn split_tokens(locations: &str) -> Vec<String> {
    let re = Regex::new(r"[,;/&]+|\band\b").expect("valid location delimiter regex");
    re.split(locations)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Strips any parenthesized suffix, e.g. `"USA (US)"` → `"USA"`.
pub(crate) fn clean_label(token: &str) -> String {
    let re = Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical regex");
    re.replace_all(token, "").trim().to_owned()
}

/// Resolves a raw locations string to an ordered coordinate sequence,
/// deduplicated by ISO code within this call.
///
/// Per-token resolution order: exact key, case-insensitive key (sorted
/// table order, first match wins), then a parenthesized 2–3 letter code
/// looked up directly. The first success wins; a token resolving to an
/// already-seen code emits nothing.
#[must_use]
pub fn geocode(locations: &str, countries: &CountryTable) -> Vec<Coordinate> {
    let iso_re = Regex::new(r"\(([A-Z]{2,3})\)").expect("valid iso code regex");

    let mut seen: HashSet<String> = HashSet::new();
    let mut coords = Vec::new();

    for token in split_tokens(locations) {
        let label = clean_label(&token);
        if label.is_empty() {
            continue;
        }

        let entry = countries
            .get(&label)
            .or_else(|| countries.get_case_insensitive(&label))
            .or_else(|| {
                iso_re
                    .captures(&token)
                    .and_then(|c| c.get(1))
                    .and_then(|code| countries.get(code.as_str()))
            });

        if let Some(entry) = entry {
            if seen.insert(entry.cca2.clone()) {
                coords.push(Coordinate {
                    lat: entry.lat,
                    lng: entry.lng,
                    label,
                    code: entry.cca2.clone(),
                });
            }
        }
    }

    coords
}
