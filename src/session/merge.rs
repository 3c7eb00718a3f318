//! Label Merge Engine
//!
//! Reconciles the current page of listings with previously persisted label
//! records, producing the "already labeled" hints the annotator sees.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Label, LabelRecord, Listing};

/// A listing annotated with its prior-label hint for display
///
/// `previous_label` is a default-selection hint only; whatever the annotator
/// selects on the current page wins at submit time.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub previous_label: Option<Label>,
    pub was_previously_labeled: bool,
}

/// Attach prior labels to the page's listings
///
/// Pure over its inputs. Duplicate records for the same key are tolerated by
/// keeping the first occurrence, so the result is deterministic even if the
/// store handed back more than one record per key.
pub fn merge_labels(page: &[Listing], prior: &[LabelRecord]) -> Vec<AnnotatedListing> {
    let mut by_key: HashMap<&str, Label> = HashMap::with_capacity(prior.len());
    for record in prior {
        by_key.entry(record.key.as_str()).or_insert(record.label);
    }

    page.iter()
        .map(|listing| {
            let previous_label = by_key.get(listing.key.as_str()).copied();
            AnnotatedListing {
                listing: listing.clone(),
                was_previously_labeled: previous_label.is_some(),
                previous_label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(key: &str) -> Listing {
        Listing::new(
            key.to_string(),
            format!("Listing {}", key),
            5_000.0,
            "Jakarta".to_string(),
            "3 sold".to_string(),
        )
    }

    fn record(key: &str, label: Label) -> LabelRecord {
        LabelRecord::new(&listing(key), label, Utc::now())
    }

    #[test]
    fn test_prior_label_attached() {
        let merged = merge_labels(&[listing("a")], &[record("a", Label::Illegal)]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].was_previously_labeled);
        assert_eq!(merged[0].previous_label, Some(Label::Illegal));
    }

    #[test]
    fn test_absent_key_not_previously_labeled() {
        let merged = merge_labels(&[listing("a")], &[record("b", Label::Legal)]);
        assert!(!merged[0].was_previously_labeled);
        assert_eq!(merged[0].previous_label, None);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let page = vec![listing("a"), listing("b")];
        let prior = vec![record("b", Label::Legal)];

        let first = merge_labels(&page, &prior);
        let second = merge_labels(&page, &prior);
        for (x, y) in first.iter().zip(second.iter()) {
            assert_eq!(x.listing.key, y.listing.key);
            assert_eq!(x.previous_label, y.previous_label);
            assert_eq!(x.was_previously_labeled, y.was_previously_labeled);
        }
    }

    #[test]
    fn test_duplicate_records_first_wins() {
        let prior = vec![record("a", Label::Illegal), record("a", Label::Legal)];
        let merged = merge_labels(&[listing("a")], &prior);
        assert_eq!(merged[0].previous_label, Some(Label::Illegal));
    }

    #[test]
    fn test_empty_prior_records() {
        let merged = merge_labels(&[listing("a"), listing("b")], &[]);
        assert!(merged.iter().all(|m| !m.was_previously_labeled));
    }
}
