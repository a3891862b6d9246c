//! Dedup/merge of raw entries into one record per provider name, plus
//! region derivation from merged coordinates.
//!
//! The grouping key is the exact name string — no normalization, so two
//! differently-capitalized names are distinct providers. Scalar fields
//! (url, company country, description) resolve first-seen / first-non-empty;
//! collection fields union. That asymmetry is intentional and pinned by the
//! regression tests in `merge_test.rs`.

use std::collections::{BTreeSet, HashMap, HashSet};

use btcvps_core::{Category, Coordinate, CountryTable, Provider, RawEntry};

struct Accumulator {
    url: String,
    categories: BTreeSet<Category>,
    locations: Vec<String>,
    locations_seen: HashSet<String>,
    coordinates: Vec<Coordinate>,
    codes_seen: HashSet<String>,
    company_country: String,
    payments: BTreeSet<String>,
    tor_friendly: bool,
    features: BTreeSet<String>,
    description: String,
}

impl Accumulator {
    fn new(entry: &RawEntry) -> Self {
        Self {
            url: entry.url.clone(),
            categories: BTreeSet::new(),
            locations: Vec::new(),
            locations_seen: HashSet::new(),
            coordinates: Vec::new(),
            codes_seen: HashSet::new(),
            company_country: String::new(),
            payments: BTreeSet::new(),
            tor_friendly: false,
            features: BTreeSet::new(),
            description: String::new(),
        }
    }

    fn absorb(&mut self, entry: RawEntry) {
        self.categories.insert(entry.category);
        self.payments.extend(entry.payments);
        self.features.extend(entry.features);
        self.tor_friendly |= entry.tor_friendly;

        if self.company_country.is_empty() && !entry.company_country.is_empty() {
            self.company_country = entry.company_country;
        }
        if self.description.is_empty() && !entry.description.is_empty() {
            self.description = entry.description;
        }

        for location in entry.locations {
            if self.locations_seen.insert(location.clone()) {
                self.locations.push(location);
            }
        }
        for coordinate in entry.coordinates {
            if self.codes_seen.insert(coordinate.code.clone()) {
                self.coordinates.push(coordinate);
            }
        }
    }
}

/// Collapses the raw entry sequence into one [`Provider`] per distinct name,
/// in first-seen name order. Regions are derived from the merged coordinate
/// set; providers with no resolvable coordinates get exactly `["Worldwide"]`.
#[must_use]
pub fn merge_entries(entries: Vec<RawEntry>, countries: &CountryTable) -> Vec<Provider> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Accumulator> = HashMap::new();

    for entry in entries {
        let acc = by_name.entry(entry.name.clone()).or_insert_with(|| {
            order.push(entry.name.clone());
            Accumulator::new(&entry)
        });
        acc.absorb(entry);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let acc = by_name.remove(&name)?;
            let regions = derive_regions(&acc.coordinates, countries);
            Some(Provider {
                name,
                url: acc.url,
                categories: acc.categories.into_iter().collect(),
                regions,
                locations: acc.locations,
                coordinates: acc.coordinates,
                company_country: acc.company_country,
                payments: acc.payments.into_iter().collect(),
                tor_friendly: acc.tor_friendly,
                features: acc.features.into_iter().collect(),
                description: acc.description,
                aff: false,
            })
        })
        .collect()
}

/// Maps each coordinate's ISO code back through the reference table to its
/// subregion, collapses subregions into coarse regions, and returns the
/// sorted set — or exactly `["Worldwide"]` when nothing resolved.
fn derive_regions(coordinates: &[Coordinate], countries: &CountryTable) -> Vec<String> {
    let regions: BTreeSet<&'static str> = coordinates
        .iter()
        .filter_map(|c| countries.get(&c.code))
        .filter_map(|entry| region_for_subregion(&entry.subregion))
        .collect();

    if regions.is_empty() {
        vec!["Worldwide".to_owned()]
    } else {
        regions.into_iter().map(str::to_owned).collect()
    }
}

/// Collapses a fine-grained subregion label into the coarse output region.
/// Unknown subregions map to nothing and are dropped.
fn region_for_subregion(subregion: &str) -> Option<&'static str> {
    match subregion {
        "Northern Europe" | "Western Europe" | "Eastern Europe" | "Southern Europe"
        | "Central Europe" => Some("Europe"),
        "Northern America" => Some("North America"),
        "Caribbean" | "Central America" => Some("Central America"),
        "South America" => Some("South America"),
        "Western Asia" => Some("Middle East"),
        "Eastern Asia" | "South-Eastern Asia" | "Southern Asia" | "Central Asia" => Some("Asia"),
        "Northern Africa" | "Western Africa" | "Eastern Africa" | "Middle Africa"
        | "Southern Africa" => Some("Africa"),
        "Australia and New Zealand" => Some("Australia"),
        "Melanesia" | "Micronesia" | "Polynesia" => Some("Oceania"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
