//! Shared data model for the extraction pipeline.
//!
//! [`RawEntry`] is one directory list-item's extracted fields, produced by the
//! scraper's record extractor and consumed (and discarded) by the merger.
//! [`Provider`] is the persisted unit: one record per distinct provider name.
//!
//! ## Wire contract
//!
//! The serialized [`Provider`] shape is consumed downstream as-is, so the
//! field names and orderings here are load-bearing:
//! - `categories`, `payments`, `features` are deduplicated and sorted
//!   ascending;
//! - `regions` is sorted ascending, or exactly `["Worldwide"]` when no
//!   coordinate resolved;
//! - `locations` and `coordinates` keep first-seen order.

use serde::Serialize;

/// Directory section a provider entry was listed under.
///
/// Variants are declared in ascending order of their display strings so the
/// derived `Ord` matches the sorted serialization contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Dedicated Server")]
    DedicatedServer,
    Domain,
    Email,
    #[serde(rename = "Low End VPS")]
    LowEndVps,
    Other,
    #[serde(rename = "VDS")]
    Vds,
    #[serde(rename = "VPN")]
    Vpn,
    #[serde(rename = "VPS")]
    Vps,
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DedicatedServer => "Dedicated Server",
            Category::Domain => "Domain",
            Category::Email => "Email",
            Category::LowEndVps => "Low End VPS",
            Category::Other => "Other",
            Category::Vds => "VDS",
            Category::Vpn => "VPN",
            Category::Vps => "VPS",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved location: the matched label plus the country's centroid and
/// ISO-3166 alpha-2 code. The code is the dedup key within a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    /// The matched token before lookup, parenthetical suffix stripped.
    pub label: String,
    pub code: String,
}

/// One directory list-item's extracted, unmerged provider data.
///
/// Created once per list item carrying a `Location(s):` marker; immutable
/// after creation.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub name: String,
    /// Anchor href — possibly an internal tracking path like `/cgi-bin/...`.
    pub url: String,
    pub category: Category,
    /// Cleaned location labels, in listing order.
    pub locations: Vec<String>,
    pub coordinates: Vec<Coordinate>,
    /// May be empty when the entry has no registration clause.
    pub company_country: String,
    /// Payment tags in the fixed pattern-table order.
    pub payments: Vec<String>,
    pub features: Vec<String>,
    pub tor_friendly: bool,
    /// Trimmed free text after the registration clause, at most 500 chars.
    pub description: String,
}

/// The deduplicated, unioned record for one distinct provider name.
///
/// Mutated only by the redirect resolver (`url`, `aff`), then handed
/// immutably to the output sink.
#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
    pub regions: Vec<String>,
    pub locations: Vec<String>,
    pub coordinates: Vec<Coordinate>,
    pub company_country: String,
    pub payments: Vec<String>,
    pub tor_friendly: bool,
    pub features: Vec<String>,
    pub description: String,
    /// True when the resolved link carries referral attribution, or when
    /// resolution failed (unresolved links are treated as affiliate-flagged).
    pub aff: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ord_matches_display_string_order() {
        let mut categories = vec![
            Category::Vps,
            Category::Other,
            Category::DedicatedServer,
            Category::LowEndVps,
            Category::Vpn,
            Category::Email,
            Category::Vds,
            Category::Domain,
        ];
        categories.sort();
        let displayed: Vec<&str> = categories.iter().map(Category::as_str).collect();
        let mut sorted_strings = displayed.clone();
        sorted_strings.sort_unstable();
        assert_eq!(displayed, sorted_strings);
    }

    #[test]
    fn category_serializes_to_display_string() {
        assert_eq!(
            serde_json::to_value(Category::LowEndVps).unwrap(),
            serde_json::json!("Low End VPS")
        );
        assert_eq!(
            serde_json::to_value(Category::Vps).unwrap(),
            serde_json::json!("VPS")
        );
        assert_eq!(
            serde_json::to_value(Category::DedicatedServer).unwrap(),
            serde_json::json!("Dedicated Server")
        );
    }

    #[test]
    fn provider_serializes_wire_contract_field_names() {
        let provider = Provider {
            name: "Example Host".to_owned(),
            url: "https://host.example".to_owned(),
            categories: vec![Category::Vps],
            regions: vec!["Europe".to_owned()],
            locations: vec!["Germany".to_owned()],
            coordinates: vec![Coordinate {
                lat: 51.1657,
                lng: 10.4515,
                label: "Germany".to_owned(),
                code: "DE".to_owned(),
            }],
            company_country: "Panama".to_owned(),
            payments: vec!["BTC".to_owned()],
            tor_friendly: true,
            features: vec!["No KYC".to_owned()],
            description: "desc".to_owned(),
            aff: false,
        };
        let value = serde_json::to_value(&provider).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "name",
            "url",
            "categories",
            "regions",
            "locations",
            "coordinates",
            "company_country",
            "payments",
            "tor_friendly",
            "features",
            "description",
            "aff",
        ] {
            assert!(obj.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(obj.len(), 12);
        let coord = &value["coordinates"][0];
        assert_eq!(coord["code"], "DE");
        assert_eq!(coord["label"], "Germany");
    }
}
