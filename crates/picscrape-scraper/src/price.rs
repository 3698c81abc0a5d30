//! Price-per-point report.
//!
//! Each product page is fetched once; the page title and the sales price are
//! read from it. Every failure degrades to a missing price so the report
//! always prints one row per URL.

use std::io::Write;
use std::str::FromStr;
use std::sync::LazyLock;

use picscrape_core::{PointsTier, ProductPriceRecord, SiteConfig};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use scraper::Html;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::html::{compile_selector, select_first_text};

/// Title used when the page has none or could not be fetched.
pub const UNKNOWN_TITLE: &str = "unknown";

const NOT_AVAILABLE: &str = "N/A";

/// Titles longer than this are cut in the report's product column.
const TITLE_MAX_CHARS: usize = 57;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d,.]+").expect("valid price regex"));

/// Parses the first run of digits and separators in `text`, reading `,` as
/// the decimal separator.
///
/// `"12,50 €"` gives `12.50`. Returns `None` when there is no such run or it
/// does not form a number.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<Decimal> {
    let matched = PRICE_RE.find(text)?;
    Decimal::from_str(&matched.as_str().replace(',', ".")).ok()
}

/// Reads the page title and sales price from a product page body.
pub(crate) fn parse_price_page(body: &str, config: &SiteConfig) -> (String, Option<Decimal>) {
    let doc = Html::parse_document(body);

    let title = select_first_text(&doc, &config.page_title_selector)
        .ok()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_owned());

    let price = match compile_selector(&config.sales_price_selector) {
        Ok(selector) => doc.select(&selector).next().and_then(|element| {
            // Text nodes are trimmed individually and glued, so "12 <sup>,50</sup>"
            // reads as "12,50".
            let text: String = element.text().map(str::trim).collect();
            parse_price_text(&text)
        }),
        Err(e) => {
            tracing::warn!(error = %e, "sales price selector is invalid");
            None
        }
    };

    (title, price)
}

/// Fetches one product page and returns its title and sales price.
///
/// Never fails: a transport error yields `("unknown", None)`, a non-2xx status
/// yields the page title (if any) without a price, and a missing or
/// malformed price element yields `None`.
pub async fn fetch_price(
    client: &PageClient,
    config: &SiteConfig,
    url: &str,
) -> (String, Option<Decimal>) {
    let page = match client.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url, error = %e, "price lookup failed");
            return (UNKNOWN_TITLE.to_owned(), None);
        }
    };

    let (title, price) = parse_price_page(&page.body, config);
    if !page.is_success() {
        tracing::warn!(url, status = page.status, "no page, price unavailable");
        return (title, None);
    }
    if price.is_none() {
        tracing::debug!(url, "no sales price on page");
    }
    (title, price)
}

/// Header line of the price report. Callers underline it with
/// [`report_rule`].
#[must_use]
pub fn report_header() -> String {
    format!(
        "{:<10} {:<10} {:<15} {:<60}",
        "Points", "Price", "€ per point", "Product"
    )
}

/// A line of `-` as long as `header`, in characters.
#[must_use]
pub fn report_rule(header: &str) -> String {
    "-".repeat(header.chars().count())
}

/// Midpoints round away from zero, so `0.0125` shows as `0.013`.
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats one fixed-width report row.
///
/// Columns: points (10), price with 2 decimals (10), price per point with 3
/// decimals (15), title cut to 57 characters and padded to 60. A missing
/// price prints `N/A` in both numeric columns.
#[must_use]
pub fn format_row(record: &ProductPriceRecord) -> String {
    let points = record.tier.points();
    let (price, per_point) = match (record.price, record.price_per_point()) {
        (Some(price), Some(per_point)) => (
            format!("{:.2}", round_half_up(price, 2)),
            format!("{:.3}", round_half_up(per_point, 3)),
        ),
        _ => (NOT_AVAILABLE.to_owned(), NOT_AVAILABLE.to_owned()),
    };
    format!(
        "{points:<10} {price:<10} {per_point:<15} {:<60.prec$}",
        record.title,
        prec = TITLE_MAX_CHARS
    )
}

/// Fetches each URL in order and writes one row per URL to `out`.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] only if writing to `out` fails; lookup
/// failures become `N/A` rows.
pub async fn render_tier_report<W: Write>(
    client: &PageClient,
    config: &SiteConfig,
    urls: &[String],
    tier: PointsTier,
    out: &mut W,
) -> Result<(), ScraperError> {
    for url in urls {
        let (title, price) = fetch_price(client, config, url).await;
        let record = ProductPriceRecord { title, price, tier };
        writeln!(out, "{}", format_row(&record))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
