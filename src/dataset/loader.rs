//! CSV Dataset Loader
//!
//! Reads the scraped listing export (columns: title, price, location, sold,
//! link) and maps each row to a `Listing` keyed by its source URL.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::Dataset;
use crate::domain::{DomainError, DomainResult, Listing};

/// Raw CSV row as exported by the scraper
#[derive(Debug, Deserialize)]
struct RawRow {
    title: String,
    price: f64,
    location: String,
    sold: String,
    link: String,
}

/// Load the dataset once at session start
///
/// A missing or malformed file is fatal; the session cannot proceed without
/// its dataset. Duplicate keys are kept (the export is expected to be
/// deduplicated upstream) but logged, since labels for duplicated keys
/// collapse onto one store record.
pub fn load_dataset(path: &Path) -> DomainResult<Dataset> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DomainError::DatasetLoad(format!("{}: {}", path.display(), e)))?;

    let mut listings = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (line, row) in reader.deserialize::<RawRow>().enumerate() {
        let row = row.map_err(|e| {
            DomainError::DatasetLoad(format!("{} row {}: {}", path.display(), line + 1, e))
        })?;
        if !seen.insert(row.link.clone()) {
            tracing::warn!(key = %row.link, "duplicate key in dataset; labels will collapse onto one record");
        }
        listings.push(Listing::new(
            row.link,
            row.title,
            row.price,
            row.location,
            row.sold,
        ));
    }

    tracing::info!(items = listings.len(), path = %path.display(), "dataset loaded");
    Ok(Dataset::new(listings))
}
