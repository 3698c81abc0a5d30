//! Nutrition fields from product pages.

use std::pin::pin;
use std::str::FromStr;

use futures::StreamExt;
use picscrape_core::{ProductLink, ProductRecord, SiteConfig};
use rust_decimal::Decimal;
use scraper::Html;

use crate::client::PageClient;
use crate::crawl::SiteCrawl;
use crate::error::ScraperError;
use crate::html::select_first_text;

/// Parses the sugar cell of the nutrition table.
///
/// The cell mixes a unit label with the value (`"100g 5,2g"`): the text is
/// split on `g` and the second piece kept, whitespace and `<` are dropped and
/// `,` is read as the decimal separator. Cells of any other shape are
/// rejected rather than guessed at.
///
/// # Errors
///
/// Returns [`ScraperError::SugarFormat`] if there is no second piece or it
/// is not a number.
pub fn parse_sugar_quantity(raw: &str) -> Result<Decimal, ScraperError> {
    let segment = raw
        .split('g')
        .nth(1)
        .ok_or_else(|| ScraperError::SugarFormat {
            raw: raw.to_owned(),
            reason: "no `g` unit in cell".to_owned(),
        })?;

    let cleaned: String = segment
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '<')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).map_err(|e| ScraperError::SugarFormat {
        raw: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Reads a [`ProductRecord`] out of a product page body.
pub(crate) fn parse_product_page(
    body: &str,
    config: &SiteConfig,
    link: &ProductLink,
) -> Result<ProductRecord, ScraperError> {
    let doc = Html::parse_document(body);

    let sugar_cell = select_first_text(&doc, &config.sugar_quantity_selector)?;
    let sugar_quantity = parse_sugar_quantity(&sugar_cell)?;

    Ok(ProductRecord {
        product_name: select_first_text(&doc, &config.product_name_selector)?,
        category: link.category.clone(),
        url: link.url.clone(),
        reference_quantity: select_first_text(&doc, &config.quantity_ref_selector)?,
        sugar_title: select_first_text(&doc, &config.sugar_title_selector)?,
        sugar_quantity,
    })
}

/// Fetches one product page and extracts its nutrition fields.
///
/// # Errors
///
/// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`] if the page
///   cannot be fetched.
/// - [`ScraperError::MissingElement`] if a field's selector matches nothing.
/// - [`ScraperError::SugarFormat`] if the sugar cell does not parse.
pub async fn extract_product(
    client: &PageClient,
    config: &SiteConfig,
    link: &ProductLink,
) -> Result<ProductRecord, ScraperError> {
    let body = client.fetch_ok(&link.url).await?;
    parse_product_page(&body, config, link)
}

/// Crawls the whole site and extracts every product, in crawl order.
///
/// Products whose extraction fails are logged with their URL and dropped.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if the crawl selectors do not
/// parse. Nothing is fetched in that case.
pub async fn collect_products(
    client: &PageClient,
    config: &SiteConfig,
) -> Result<Vec<ProductRecord>, ScraperError> {
    let mut links = pin!(SiteCrawl::new(client, config)?.into_stream());
    let mut products = Vec::new();
    let mut failed = 0usize;

    while let Some(link) = links.next().await {
        match extract_product(client, config, &link).await {
            Ok(product) => products.push(product),
            Err(e) => {
                failed += 1;
                tracing::warn!(url = %link.url, error = %e, "issue with product url");
            }
        }
    }

    tracing::info!(extracted = products.len(), failed, "crawl finished");
    Ok(products)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
