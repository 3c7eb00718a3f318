//! Submission Handler
//!
//! Turns the annotator's staged selections for one page into a single
//! persistable batch, stamped with one submission timestamp.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{DomainError, DomainResult, Label, LabelRecord, Listing};

/// What to do with page items the annotator left unselected at submit time
///
/// The original tool silently defaulted unset labels to "legal", which risks
/// mislabeling un-reviewed items. Rejection is the default here; the legacy
/// behavior is opt-in and always reported in the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnlabeledPolicy {
    /// Fail the submission, naming the unlabeled keys
    #[default]
    Reject,
    /// Fill unlabeled items with `Label::Legal` and report which keys were defaulted
    DefaultLegal,
}

/// Result of a successful page submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    /// Records written (always the whole page)
    pub saved: usize,
    /// Keys that had no selection and were filled by `UnlabeledPolicy::DefaultLegal`
    pub defaulted_keys: Vec<String>,
    /// Shared timestamp stamped on every record in the batch
    pub timestamp: DateTime<Utc>,
}

/// Build the batch for one page from the staged draft
///
/// Pure: the page slice, the draft, the policy and the clock reading fully
/// determine the output. The batch covers exactly the page, in page order.
pub fn build_batch(
    page: &[Listing],
    draft: &HashMap<String, Label>,
    policy: UnlabeledPolicy,
    now: DateTime<Utc>,
) -> DomainResult<(Vec<LabelRecord>, Vec<String>)> {
    let unlabeled: Vec<String> = page
        .iter()
        .filter(|listing| !draft.contains_key(&listing.key))
        .map(|listing| listing.key.clone())
        .collect();

    if policy == UnlabeledPolicy::Reject && !unlabeled.is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "{} item(s) on this page have no label selected: {}",
            unlabeled.len(),
            unlabeled.join(", ")
        )));
    }

    let records = page
        .iter()
        .map(|listing| {
            let label = draft.get(&listing.key).copied().unwrap_or(Label::Legal);
            LabelRecord::new(listing, label, now)
        })
        .collect();

    Ok((records, unlabeled))
}
