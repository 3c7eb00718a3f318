//! Dataset Layer
//!
//! Loads the listing dataset from CSV into an immutable, ordered collection
//! shared across the session.

mod loader;

pub use loader::load_dataset;

use crate::domain::page;
use crate::domain::Listing;

/// Immutable ordered collection of listings for one labeling run
///
/// Created once at startup and threaded through the session behind an `Arc`;
/// there is no global dataset state.
#[derive(Debug)]
pub struct Dataset {
    listings: Vec<Listing>,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Pages needed to show the whole dataset at `page_size` items per page
    pub fn page_count(&self, page_size: usize) -> usize {
        page::page_count(self.listings.len(), page_size)
    }

    /// Listings on 1-based page `page_number`
    pub fn page(&self, page_size: usize, page_number: usize) -> &[Listing] {
        &self.listings[page::page_bounds(self.listings.len(), page_size, page_number)]
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }
}
