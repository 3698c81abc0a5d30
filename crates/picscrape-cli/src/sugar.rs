//! `picscrape sugar`: crawl a site and save sugar content per product.

use std::path::Path;

use picscrape_core::{AppConfig, Site};
use picscrape_scraper::{collect_products, write_csv};

use crate::build_page_client;

/// Crawls `site`, extracts every product and writes the sorted CSV to
/// `output`.
///
/// Per-product failures are logged and skipped inside the crawl; records are
/// only held in memory until the CSV is written.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the site's selectors
/// are invalid, or the CSV cannot be written.
pub(crate) async fn run_sugar(config: &AppConfig, site: Site, output: &Path) -> anyhow::Result<()> {
    let client = build_page_client(config)?;
    let site_config = site.config();

    tracing::info!(%site, output = %output.display(), "starting sugar extraction");
    let products = collect_products(&client, &site_config).await?;
    write_csv(&products, output)?;

    println!("Saved {site} data at {}", output.display());
    Ok(())
}
