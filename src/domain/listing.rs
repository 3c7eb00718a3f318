//! Listing Entity
//!
//! Represents one product listing from the dataset. Listings are immutable
//! after load; the annotator's in-flight label lives in the session draft,
//! not on the listing itself.

use serde::{Deserialize, Serialize};

/// One labelable product listing
///
/// Identity is `key` (the source URL); every other field is display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Stable unique identifier (source URL)
    pub key: String,
    pub title: String,
    pub price: f64,
    pub location: String,
    /// Sold-count text as scraped, e.g. "100+ sold"
    pub sold: String,
}

impl Listing {
    pub fn new(key: String, title: String, price: f64, location: String, sold: String) -> Self {
        Self {
            key,
            title,
            price,
            location,
            sold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_identity_is_key() {
        let listing = Listing::new(
            "https://example.com/item/42".to_string(),
            "Canned fruit".to_string(),
            9_500.0,
            "Bandung".to_string(),
            "12 sold".to_string(),
        );
        assert_eq!(listing.key, "https://example.com/item/42");
    }
}
