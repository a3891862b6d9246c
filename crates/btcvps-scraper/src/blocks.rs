//! Block classification: walking the page's heading/list structure.
//!
//! The listing page interleaves `h1` category headings, `h2` informational
//! headings, and `ul` provider lists. Classification threads a single
//! "current category" accumulator through the ordered block sequence;
//! level-2 headings carry no pipeline state because regions are derived from
//! coordinates at merge time, not from headings.

use btcvps_core::{Category, CountryTable, RawEntry};

use crate::extract::extract_entry;
use crate::patterns::Patterns;

/// One typed content block from the listing page, in document order.
#[derive(Debug, Clone)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    List(Vec<ListItem>),
}

/// A single direct `li` child of a directory list.
#[derive(Debug, Clone)]
pub struct ListItem {
    /// Whitespace-joined visible text of the whole item.
    pub text: String,
    /// The item's first anchor, if any.
    pub anchor: Option<Anchor>,
}

#[derive(Debug, Clone)]
pub struct Anchor {
    pub text: String,
    pub href: String,
}

/// Maps a level-1 heading to the directory category it opens.
///
/// Case-insensitive substring checks in fixed priority order; "low end vps"
/// must be tested before the bare "vps".
#[must_use]
pub fn detect_category(heading: &str) -> Category {
    let lower = heading.to_lowercase();
    if lower.contains("low end vps") {
        Category::LowEndVps
    } else if lower.contains("vps") {
        Category::Vps
    } else if lower.contains("dedicated") {
        Category::DedicatedServer
    } else if lower.contains("vpn") {
        Category::Vpn
    } else if lower.contains("vds") {
        Category::Vds
    } else if lower.contains("email") {
        Category::Email
    } else if lower.contains("domain") {
        Category::Domain
    } else {
        Category::Other
    }
}

/// Walks the ordered block sequence and extracts one [`RawEntry`] per
/// recognizable list item, tagging each with the category opened by the most
/// recent level-1 heading (`Other` before the first one). Items the
/// extractor rejects are skipped.
#[must_use]
pub fn collect_entries(
    blocks: &[Block],
    patterns: &Patterns,
    countries: &CountryTable,
) -> Vec<RawEntry> {
    let (entries, _) = blocks.iter().fold(
        (Vec::new(), Category::Other),
        |(mut entries, category), block| match block {
            Block::Heading1(text) => (entries, detect_category(text)),
            Block::Heading2(_) => (entries, category),
            Block::List(items) => {
                entries.extend(
                    items
                        .iter()
                        .filter_map(|item| extract_entry(item, category, patterns, countries)),
                );
                (entries, category)
            }
        },
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> CountryTable {
        CountryTable::from_json_str(
            r#"{
                "Germany": {"cca2": "DE", "lat": 51.1657, "lng": 10.4515, "subregion": "Western Europe"},
                "Iceland": {"cca2": "IS", "lat": 64.9631, "lng": -19.0208, "subregion": "Northern Europe"}
            }"#,
        )
        .unwrap()
    }

    fn item(name: &str, text: &str) -> ListItem {
        ListItem {
            text: text.to_owned(),
            anchor: Some(Anchor {
                text: name.to_owned(),
                href: "/cgi-bin/go".to_owned(),
            }),
        }
    }

    #[test]
    fn detect_category_priority_order() {
        assert_eq!(detect_category("Low End VPS providers"), Category::LowEndVps);
        assert_eq!(detect_category("VPS providers"), Category::Vps);
        assert_eq!(detect_category("Dedicated Server providers"), Category::DedicatedServer);
        assert_eq!(detect_category("VPN providers"), Category::Vpn);
        assert_eq!(detect_category("VDS providers"), Category::Vds);
        assert_eq!(detect_category("Email providers"), Category::Email);
        assert_eq!(detect_category("Domain providers"), Category::Domain);
        assert_eq!(detect_category("Miscellaneous"), Category::Other);
    }

    #[test]
    fn detect_category_low_end_beats_bare_vps() {
        assert_eq!(detect_category("the low end vps corner"), Category::LowEndVps);
    }

    #[test]
    fn detect_category_is_case_insensitive() {
        assert_eq!(detect_category("DEDICATED hosting"), Category::DedicatedServer);
    }

    #[test]
    fn collect_entries_tags_items_with_current_category() {
        let blocks = vec![
            Block::Heading1("VPS providers".to_owned()),
            Block::List(vec![item("Alpha", "Alpha Locations: Germany.")]),
            Block::Heading1("VPN providers".to_owned()),
            Block::List(vec![item("Beta", "Beta Locations: Iceland.")]),
        ];
        let entries = collect_entries(&blocks, &Patterns::new(), &countries());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, Category::Vps);
        assert_eq!(entries[1].category, Category::Vpn);
    }

    #[test]
    fn collect_entries_before_any_heading_is_other() {
        let blocks = vec![Block::List(vec![item("Alpha", "Alpha Locations: Germany.")])];
        let entries = collect_entries(&blocks, &Patterns::new(), &countries());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, Category::Other);
    }

    #[test]
    fn collect_entries_heading2_does_not_change_category() {
        let blocks = vec![
            Block::Heading1("VPS providers".to_owned()),
            Block::Heading2("Email section lookalike".to_owned()),
            Block::List(vec![item("Alpha", "Alpha Locations: Germany.")]),
        ];
        let entries = collect_entries(&blocks, &Patterns::new(), &countries());
        assert_eq!(entries[0].category, Category::Vps);
    }

    #[test]
    fn collect_entries_skips_rejected_items() {
        let blocks = vec![
            Block::Heading1("VPS providers".to_owned()),
            Block::List(vec![
                item("Alpha", "Alpha has no location marker at all"),
                item("Beta", "Beta Locations: Germany."),
                ListItem {
                    text: "Gamma Locations: Germany.".to_owned(),
                    anchor: None,
                },
            ]),
        ];
        let entries = collect_entries(&blocks, &Patterns::new(), &countries());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Beta");
    }
}
