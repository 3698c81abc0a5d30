//! Two-level site crawl: listing page → categories → product links.
//!
//! [`SiteCrawl`] is lazy. The listing page is fetched on the first poll and
//! each category page only once the previous category's products have all
//! been handed out.

use std::collections::VecDeque;

use futures::Stream;
use picscrape_core::{CategoryRef, ProductLink, SiteConfig};
use scraper::{Html, Selector};

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::html::compile_selector;

/// Categories found on a listing page, in page order.
///
/// Buttons without an id, or whose id lacks the site's navigation prefix,
/// are skipped.
#[must_use]
pub fn category_refs(
    listing_html: &str,
    listing_selector: &Selector,
    config: &SiteConfig,
) -> Vec<CategoryRef> {
    let doc = Html::parse_document(listing_html);
    doc.select(listing_selector)
        .filter_map(|button| {
            let id = button.value().attr("id").unwrap_or_default();
            let Some(name) = config.category_name(id) else {
                tracing::debug!(id, "skipping category");
                return None;
            };
            Some(CategoryRef {
                name: name.to_owned(),
                url: config.category_url(name),
            })
        })
        .collect()
}

/// Absolute product URLs found on a category page, in page order.
///
/// Links without an `href` are skipped.
#[must_use]
pub fn product_urls(
    category_html: &str,
    product_selector: &Selector,
    config: &SiteConfig,
) -> Vec<String> {
    let doc = Html::parse_document(category_html);
    doc.select(product_selector)
        .filter_map(|link| link.value().attr("href"))
        .map(|href| config.resolve_url(href))
        .collect()
}

/// Lazy, finite, non-restartable sequence of [`ProductLink`]s for one site.
pub struct SiteCrawl<'a> {
    client: &'a PageClient,
    config: &'a SiteConfig,
    listing_selector: Selector,
    product_selector: Selector,
    /// `None` until the listing page has been fetched.
    categories: Option<VecDeque<CategoryRef>>,
    pending: VecDeque<ProductLink>,
}

impl<'a> SiteCrawl<'a> {
    /// Prepares a crawl of `config`'s site. No request is made yet.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the listing or product
    /// selector does not parse.
    pub fn new(client: &'a PageClient, config: &'a SiteConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            client,
            config,
            listing_selector: compile_selector(&config.listing_selector)?,
            product_selector: compile_selector(&config.product_selector)?,
            categories: None,
            pending: VecDeque::new(),
        })
    }

    /// Returns the next product link, fetching pages as needed.
    ///
    /// A listing page that cannot be fetched ends the crawl; a category page
    /// that cannot be fetched is logged and skipped.
    pub async fn next_product(&mut self) -> Option<ProductLink> {
        loop {
            if let Some(link) = self.pending.pop_front() {
                return Some(link);
            }
            if self.categories.is_none() {
                self.categories = Some(self.load_categories().await);
            }
            let category = self.categories.as_mut()?.pop_front()?;
            self.load_products(&category).await;
        }
    }

    /// Adapts the crawl into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = ProductLink> + 'a {
        futures::stream::unfold(self, |mut crawl| async move {
            crawl.next_product().await.map(|link| (link, crawl))
        })
    }

    async fn load_categories(&self) -> VecDeque<CategoryRef> {
        let url = self.config.listing_url();
        match self.client.fetch_ok(&url).await {
            Ok(body) => category_refs(&body, &self.listing_selector, self.config).into(),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "could not fetch listing page");
                VecDeque::new()
            }
        }
    }

    async fn load_products(&mut self, category: &CategoryRef) {
        tracing::info!(category = %category.name, "crawling category");
        let body = match self.client.fetch_ok(&category.url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    category = %category.name,
                    url = %category.url,
                    error = %e,
                    "could not fetch category page; skipping"
                );
                return;
            }
        };

        let urls = product_urls(&body, &self.product_selector, self.config);
        tracing::info!(
            category = %category.name,
            count = urls.len(),
            "found products for category"
        );
        self.pending.extend(urls.into_iter().map(|url| ProductLink {
            category: category.name.clone(),
            url,
        }));
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
