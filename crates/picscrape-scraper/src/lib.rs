pub mod client;
pub mod crawl;
pub mod error;
pub mod export;
pub mod extract;
pub mod html;
pub mod price;

pub use client::{Page, PageClient};
pub use crawl::SiteCrawl;
pub use error::ScraperError;
pub use export::{write_csv, write_csv_to};
pub use extract::{collect_products, extract_product, parse_sugar_quantity};
pub use price::{
    fetch_price, format_row, parse_price_text, render_tier_report, report_header, report_rule,
};
