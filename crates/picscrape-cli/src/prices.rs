//! `picscrape prices`: price-per-point table on stdout.

use std::io::Write;

use picscrape_core::{AppConfig, PointsTier, Site};
use picscrape_scraper::{render_tier_report, report_header, report_rule};

use crate::build_page_client;

/// Writes the report header once, then one block of rows per tier in
/// 100, 300, 700 order. `urls_by_tier` follows [`PointsTier::ALL`]; empty
/// tiers print nothing.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or `out` cannot be
/// written. Individual lookup failures print as `N/A` rows.
pub(crate) async fn run_prices<W: Write>(
    config: &AppConfig,
    site: Site,
    urls_by_tier: [Vec<String>; 3],
    out: &mut W,
) -> anyhow::Result<()> {
    let client = build_page_client(config)?;
    let site_config = site.config();

    let header = report_header();
    writeln!(out, "{header}")?;
    writeln!(out, "{}", report_rule(&header))?;

    for (tier, urls) in PointsTier::ALL.into_iter().zip(urls_by_tier) {
        if urls.is_empty() {
            continue;
        }
        tracing::debug!(%tier, count = urls.len(), "rendering tier");
        render_tier_report(&client, &site_config, &urls, tier, out).await?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "prices_test.rs"]
mod tests;
