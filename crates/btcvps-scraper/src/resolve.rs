//! Redirect resolution for tracking links.
//!
//! Directory entries link through a local tracking prefix rather than to the
//! provider directly. The resolver probes each tracking link with a single
//! non-following HEAD request and replaces it with the redirect target's
//! origin. Any probe failure falls back to the full tracking URL with the
//! affiliate flag set, so a flaky provider never aborts the run.

use futures::StreamExt;

use btcvps_core::Provider;

use crate::error::ScraperError;

/// Path prefix that marks a tracking link on the listing page.
pub const TRACKING_PREFIX: &str = "/cgi-bin/";

/// Outcome of resolving one tracking link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub aff: bool,
}

/// Resolves tracking links concurrently with a fixed worker bound.
pub struct RedirectResolver {
    client: reqwest::Client,
    workers: usize,
}

impl RedirectResolver {
    /// Builds a resolver whose HTTP client never follows redirects; the
    /// `Location` header is the payload here, not a hop to take.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] when the client cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, workers: usize) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, workers })
    }

    /// Resolves every tracking link in `providers` in place. Providers whose
    /// URL does not carry the tracking prefix are left untouched. Results
    /// are written back by index, so provider order is preserved no matter
    /// which probes finish first.
    pub async fn resolve_all(&self, origin: &str, providers: &mut [Provider]) {
        let origin = origin.trim_end_matches('/');
        let targets: Vec<(usize, String)> = providers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.url.starts_with(TRACKING_PREFIX))
            .map(|(idx, p)| (idx, format!("{origin}{}", p.url)))
            .collect();

        tracing::info!(
            total = providers.len(),
            tracking = targets.len(),
            workers = self.workers,
            "resolving tracking links"
        );

        let resolved: Vec<(usize, Resolved)> = futures::stream::iter(targets)
            .map(|(idx, full_url)| async move { (idx, self.resolve_one(full_url).await) })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        for (idx, outcome) in resolved {
            providers[idx].url = outcome.url;
            providers[idx].aff = outcome.aff;
        }
    }

    /// Probes one tracking URL. Network failure is not an error at this
    /// level; it degrades to the fail-safe outcome.
    async fn resolve_one(&self, full_url: String) -> Resolved {
        let response = match self.client.head(&full_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %full_url, error = %e, "redirect probe failed");
                return Resolved {
                    url: full_url,
                    aff: true,
                };
            }
        };

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        classify(full_url, &location)
    }
}

/// Classifies a redirect target.
///
/// A well-formed absolute `http(s)` target collapses to its origin; the
/// affiliate flag is set when the target carried a query string or a
/// non-root path. A missing or unparseable target keeps the full tracking
/// URL and is flagged as affiliate, the conservative reading.
fn classify(full_url: String, location: &str) -> Resolved {
    if location.is_empty() || !location.starts_with("http") {
        return Resolved {
            url: full_url,
            aff: true,
        };
    }
    let Ok(target) = reqwest::Url::parse(location) else {
        return Resolved {
            url: full_url,
            aff: true,
        };
    };
    let has_query = target.query().is_some_and(|q| !q.is_empty());
    let has_path = !target.path().trim_end_matches('/').is_empty();
    Resolved {
        url: target.origin().ascii_serialization(),
        aff: has_query || has_path,
    }
}
