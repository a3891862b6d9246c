//! Reference country table: name/synonym/ISO-code → coordinates + subregion.
//!
//! The table is loaded once before the pipeline runs and read-only after.
//! Keys mix canonical names (`"Germany"`), common synonyms (`"USA"`,
//! `"Holland"`), and ISO-3166 alpha-2 codes (`"DE"`), because the geocoder
//! falls back to looking up a parenthesized code directly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountriesError {
    #[error("failed to read country table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse country table {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One reference row: ISO code, centroid, and the fine-grained subregion the
/// merger later collapses into an output region.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    pub cca2: String,
    pub lat: f64,
    pub lng: f64,
    pub subregion: String,
}

/// Lookup table over [`CountryEntry`] rows.
///
/// Backed by a `BTreeMap` so the case-insensitive fallback scan iterates in
/// a deterministic (sorted-key) order.
#[derive(Debug, Clone)]
pub struct CountryTable {
    entries: BTreeMap<String, CountryEntry>,
}

impl CountryTable {
    /// Loads the table from a JSON object file mapping key → entry.
    ///
    /// # Errors
    ///
    /// Returns [`CountriesError`] when the file cannot be read or parsed.
    /// A missing or malformed table is fatal for the run.
    pub fn load(path: &Path) -> Result<Self, CountriesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CountriesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| CountriesError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parses the table from an in-memory JSON string.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, CountryEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Exact key lookup (names, synonyms, and ISO codes are all keys).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CountryEntry> {
        self.entries.get(key)
    }

    /// Case-insensitive key lookup; the first match in sorted key order wins.
    #[must_use]
    pub fn get_case_insensitive(&self, key: &str) -> Option<&CountryEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CountryTable {
        CountryTable::from_json_str(
            r#"{
                "Germany": {"cca2": "DE", "lat": 51.1657, "lng": 10.4515, "subregion": "Western Europe"},
                "DE": {"cca2": "DE", "lat": 51.1657, "lng": 10.4515, "subregion": "Western Europe"},
                "USA": {"cca2": "US", "lat": 37.0902, "lng": -95.7129, "subregion": "Northern America"},
                "US": {"cca2": "US", "lat": 37.0902, "lng": -95.7129, "subregion": "Northern America"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn exact_lookup_by_name_and_code() {
        let t = table();
        assert_eq!(t.get("Germany").unwrap().cca2, "DE");
        assert_eq!(t.get("US").unwrap().cca2, "US");
        assert!(t.get("germany").is_none());
    }

    #[test]
    fn case_insensitive_lookup() {
        let t = table();
        assert_eq!(t.get_case_insensitive("gErMaNy").unwrap().cca2, "DE");
        assert!(t.get_case_insensitive("atlantis").is_none());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = CountryTable::load(Path::new("/nonexistent/countries.json"));
        assert!(
            matches!(result, Err(CountriesError::Io { .. })),
            "expected CountriesError::Io, got: {result:?}"
        );
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(CountryTable::from_json_str("not json").is_err());
    }

    #[test]
    fn len_counts_all_keys() {
        assert_eq!(table().len(), 4);
        assert!(!table().is_empty());
    }
}
