//! Fixed pattern tables for payment-method and feature tag detection.
//!
//! Each table is an ordered mapping from tag to a set of compiled matchers;
//! the first matching pattern per tag suffices, and tags come out in table
//! order. Payment patterns are case-sensitive (`BTC` is a ticker, `btc` is
//! noise); feature patterns are case-insensitive.

use regex::Regex;

/// Compiled payment/feature/Tor matchers, built once per run.
pub struct Patterns {
    payments: Vec<(&'static str, Vec<Regex>)>,
    features: Vec<(&'static str, Vec<Regex>)>,
    tor_friendly: Vec<Regex>,
}

impl Patterns {
    /// Compiles the fixed tables.
    ///
    /// # Panics
    ///
    /// Panics if a static pattern fails to compile, which the tests pin.
    #[must_use]
    pub fn new() -> Self {
        let payments = vec![
            ("BTC", compile(&[r"\bBTC\b", r"\bBitcoin\b"])),
            (
                "Lightning",
                compile(&[r"Lightning Network", r"\bLN\b", r"BTCPayServer"]),
            ),
            ("XMR", compile(&[r"\bXMR\b", r"\bMonero\b"])),
            ("ETH", compile(&[r"\bETH\b", r"\bEthereum\b"])),
            ("LTC", compile(&[r"\bLTC\b", r"\bLitecoin\b"])),
            ("USDT", compile(&[r"\bUSDT\b", r"\bTether\b"])),
        ];

        let features = vec![
            ("BTCPayServer", compile_ci(&[r"BTCPayServer"])),
            ("Lightning Network", compile_ci(&[r"Lightning Network"])),
            ("Large Storage", compile_ci(&[r"Large Storage"])),
            ("DDoS Protection", compile_ci(&[r"DDoS"])),
            ("GPU Servers", compile_ci(&[r"GPU"])),
            (
                "Onion Site",
                compile_ci(&[r"\.onion", r"onion URL", r"onion site"]),
            ),
            ("No KYC", compile_ci(&[r"no KYC", r"without KYC"])),
            (
                "Anonymous Signup",
                compile_ci(&[r"anonymous signup", r"anonymous sign-up"]),
            ),
            (
                "Tor Friendly",
                compile_ci(&[r"Tor[\s-]*friendly", r"Tor allowed", r"allows Tor"]),
            ),
            ("API Access", compile_ci(&[r"\bAPI\b"])),
        ];

        let tor_friendly = compile_ci(&[r"Tor[\s-]*friendly", r"Tor allowed", r"allows Tor"]);

        Self {
            payments,
            features,
            tor_friendly,
        }
    }

    /// Payment tags whose patterns match `text`, in table order.
    #[must_use]
    pub fn payments(&self, text: &str) -> Vec<String> {
        matching_tags(&self.payments, text)
    }

    /// Feature tags whose patterns match `text`, in table order.
    #[must_use]
    pub fn features(&self, text: &str) -> Vec<String> {
        matching_tags(&self.features, text)
    }

    /// Whether the text advertises Tor friendliness. Checked independently
    /// of the `Tor Friendly` feature tag, with the same patterns.
    #[must_use]
    pub fn tor_friendly(&self, text: &str) -> bool {
        self.tor_friendly.iter().any(|re| re.is_match(text))
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

fn matching_tags(table: &[(&'static str, Vec<Regex>)], text: &str) -> Vec<String> {
    table
        .iter()
        .filter(|(_, patterns)| patterns.iter().any(|re| re.is_match(text)))
        .map(|(tag, _)| (*tag).to_owned())
        .collect()
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid tag pattern"))
        .collect()
}

fn compile_ci(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid tag pattern"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_compile() {
        let _ = Patterns::new();
    }

    #[test]
    fn payments_are_word_bounded_and_case_sensitive() {
        let p = Patterns::new();
        assert_eq!(p.payments("Accepts BTC"), vec!["BTC"]);
        // "BTCPay" must not trip the BTC ticker, but does imply Lightning.
        assert_eq!(p.payments("BTCPayServer support"), vec!["Lightning"]);
        // Lowercase "bitcoin" is prose, not a ticker.
        assert!(p.payments("we like bitcoin").is_empty());
    }

    #[test]
    fn payments_match_any_pattern_per_tag() {
        let p = Patterns::new();
        assert_eq!(p.payments("Pay with Monero"), vec!["XMR"]);
        assert_eq!(p.payments("Litecoin and Tether"), vec!["LTC", "USDT"]);
    }

    #[test]
    fn payments_keep_table_order() {
        let p = Patterns::new();
        assert_eq!(
            p.payments("USDT, ETH and BTC accepted"),
            vec!["BTC", "ETH", "USDT"]
        );
    }

    #[test]
    fn features_are_case_insensitive() {
        let p = Patterns::new();
        assert_eq!(p.features("ddos protection included"), vec!["DDoS Protection"]);
        assert_eq!(p.features("rent a gpu"), vec!["GPU Servers"]);
    }

    #[test]
    fn onion_site_matches_dot_onion() {
        let p = Patterns::new();
        assert_eq!(p.features("reachable via x.onion"), vec!["Onion Site"]);
    }

    #[test]
    fn tor_friendly_variants() {
        let p = Patterns::new();
        assert!(p.tor_friendly("Tor-friendly host"));
        assert!(p.tor_friendly("tor friendly"));
        assert!(p.tor_friendly("Tor allowed"));
        assert!(p.tor_friendly("this host allows Tor exits"));
        assert!(!p.tor_friendly("torrent friendly"));
    }

    #[test]
    fn tor_friendly_feature_tag_and_flag_agree() {
        let p = Patterns::new();
        let text = "signup is Tor friendly";
        assert!(p.tor_friendly(text));
        assert!(p.features(text).contains(&"Tor Friendly".to_owned()));
    }
}
