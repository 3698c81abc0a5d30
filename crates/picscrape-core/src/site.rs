//! Per-site crawl configuration.
//!
//! Every supported site has exactly one [`SiteConfig`], reachable through the
//! [`Site`] enum. Unknown site identifiers are rejected when parsed, before
//! any request is made.

use std::str::FromStr;

use crate::ConfigError;

/// Placeholder substituted with the category name in
/// [`SiteConfig::category_path_template`].
const CATEGORY_PLACEHOLDER: &str = "{category}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Picard,
}

impl Site {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Site::Picard => "picard",
        }
    }

    #[must_use]
    pub fn config(self) -> SiteConfig {
        match self {
            Site::Picard => SiteConfig {
                origin: "https://www.picard.fr".to_string(),
                listing_path: "/".to_string(),
                listing_selector: "li.pi-Nav-lvl1Item--treeview button".to_string(),
                nav_id_prefix: "navLink".to_string(),
                category_path_template: "/rayons/{category}?start=0&sz=400".to_string(),
                product_selector: "ul#search-result-items a.pi-ProductCard-link".to_string(),
                product_name_selector: "h1.pi-ProductPage-title".to_string(),
                quantity_ref_selector:
                    "table.pi-ProductTabsNutrition-table thead th:nth-child(2)".to_string(),
                sugar_title_selector:
                    "table.pi-ProductTabsNutrition-table tbody tr:nth-child(3) td:nth-child(1)"
                        .to_string(),
                sugar_quantity_selector:
                    "table.pi-ProductTabsNutrition-table tbody tr:nth-child(3) td:nth-child(2)"
                        .to_string(),
                page_title_selector: "title".to_string(),
                sales_price_selector: "div.pi-ProductDetails-salesPrice".to_string(),
            },
        }
    }
}

impl FromStr for Site {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "picard" => Ok(Site::Picard),
            _ => Err(ConfigError::UnsupportedSite(s.to_string())),
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// CSS selectors and URL shapes for crawling one retail site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Scheme and host, without a trailing slash, e.g. `"https://www.picard.fr"`.
    pub origin: String,
    pub listing_path: String,
    /// Category buttons on the listing page.
    pub listing_selector: String,
    /// Button ids must start with this to count as a category.
    pub nav_id_prefix: String,
    /// Path of a category page with `{category}` in place of the name. Asks
    /// for one oversized page instead of paginating.
    pub category_path_template: String,
    pub product_selector: String,
    pub product_name_selector: String,
    pub quantity_ref_selector: String,
    pub sugar_title_selector: String,
    pub sugar_quantity_selector: String,
    pub page_title_selector: String,
    pub sales_price_selector: String,
}

impl SiteConfig {
    /// Returns a copy of this config served from `origin` instead.
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.origin, self.listing_path)
    }

    #[must_use]
    pub fn category_url(&self, category: &str) -> String {
        let path = self
            .category_path_template
            .replace(CATEGORY_PLACEHOLDER, category);
        format!("{}{path}", self.origin)
    }

    /// Strips the navigation prefix from a category button id.
    ///
    /// Returns `None` for ids that do not carry the prefix; those buttons are
    /// not categories.
    #[must_use]
    pub fn category_name<'a>(&self, button_id: &'a str) -> Option<&'a str> {
        button_id.strip_prefix(self.nav_id_prefix.as_str())
    }

    /// Makes a site-relative link absolute. Other links pass through unchanged.
    #[must_use]
    pub fn resolve_url(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            href.to_string()
        }
    }
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
