//! Pagination Engine
//!
//! Pure page arithmetic over the ordered dataset. Page numbers are 1-based;
//! indexes are 0-based. Validation of the page number against the dataset
//! happens at the session boundary, not here.

use std::ops::Range;

/// Default number of listings shown per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of pages needed to cover `dataset_size` items
pub fn page_count(dataset_size: usize, page_size: usize) -> usize {
    debug_assert!(page_size > 0);
    dataset_size.div_ceil(page_size)
}

/// Index range of page `page_number` over a dataset of `dataset_size` items
///
/// `start = (page_number - 1) * page_size`,
/// `end = min(dataset_size, page_number * page_size)`. Both ends are clamped
/// to the dataset size, so an out-of-range page yields an empty range.
pub fn page_bounds(dataset_size: usize, page_size: usize, page_number: usize) -> Range<usize> {
    debug_assert!(page_size > 0);
    debug_assert!(page_number >= 1);
    let start = (page_number - 1).saturating_mul(page_size).min(dataset_size);
    let end = page_number.saturating_mul(page_size).min(dataset_size);
    start..end
}
