//! Listing-page fetch and block construction.
//!
//! The page is fetched once per run; any fetch failure is fatal because
//! downstream persistence expects a complete, consistent provider set.
//! Parsing flattens the document into the ordered typed blocks the
//! classifier walks.

use scraper::{ElementRef, Html, Selector};

use crate::blocks::{Anchor, Block, ListItem};
use crate::error::ScraperError;

/// Fetches the listing page body.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] on network failure and
/// [`ScraperError::UnexpectedStatus`] on any non-2xx response.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, ScraperError> {
    tracing::info!(url, "fetching listing page");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.text().await?)
}

/// Flattens the listing page into ordered typed blocks.
///
/// Walks `h1`, `h2`, and `ul` elements in document order. Only direct `li`
/// children of a list become items; a nested `ul` shows up later as its own
/// `List` block.
#[must_use]
pub fn parse_blocks(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);
    let block_selector = Selector::parse("h1, h2, ul").expect("valid block selector");
    let anchor_selector = Selector::parse("a").expect("valid anchor selector");

    document
        .select(&block_selector)
        .map(|element| match element.value().name() {
            "h1" => Block::Heading1(flatten_text(element)),
            "h2" => Block::Heading2(flatten_text(element)),
            _ => Block::List(
                element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| child.value().name() == "li")
                    .map(|li| list_item(li, &anchor_selector))
                    .collect(),
            ),
        })
        .collect()
}

fn list_item(li: ElementRef<'_>, anchor_selector: &Selector) -> ListItem {
    let anchor = li.select(anchor_selector).next().map(|a| Anchor {
        text: flatten_text(a),
        href: a.value().attr("href").unwrap_or_default().to_owned(),
    });
    ListItem {
        text: flatten_text(li),
        anchor,
    }
}

/// Visible text with every whitespace run collapsed to a single space.
fn flatten_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
