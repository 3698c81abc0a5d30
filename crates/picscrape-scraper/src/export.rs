//! Semicolon-delimited CSV of sugar content per product.
//!
//! Values are written as is: a field containing `;` shifts the following
//! columns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use picscrape_core::ProductRecord;

use crate::error::ScraperError;

pub const CSV_HEADER: [&str; 6] = [
    "product name",
    "category name",
    "product url",
    "reference quantity",
    "sugar title",
    "sugar content",
];

/// Writes `records` sorted by sugar quantity ascending to `writer`.
///
/// The sort is stable, so products with equal sugar keep crawl order. The
/// header row is always written, even with no records.
///
/// # Errors
///
/// Returns [`ScraperError::Csv`] or [`ScraperError::Io`] if writing fails.
pub fn write_csv_to<W: Write>(records: &[ProductRecord], writer: W) -> Result<(), ScraperError> {
    let mut sorted: Vec<&ProductRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.sugar_quantity);

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in sorted {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the sugar CSV to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the file cannot be created, or any error
/// from [`write_csv_to`].
pub fn write_csv(records: &[ProductRecord], path: &Path) -> Result<(), ScraperError> {
    let file = File::create(path)?;
    write_csv_to(records, file)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "wrote sugar csv");
    Ok(())
}
