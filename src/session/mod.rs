//! Session Layer
//!
//! The annotator's working state for one labeling run: the current page,
//! staged label selections, and the render/submit cycle against the label
//! store.

mod merge;
mod submit;

pub use merge::{merge_labels, AnnotatedListing};
pub use submit::{build_batch, SubmitOutcome, UnlabeledPolicy};

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::domain::{DomainError, DomainResult, Label, LabelRecord};
use crate::repository::LabelStore;

/// One rendered page, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page_number: usize,
    pub page_count: usize,
    /// Items labeled so far across the whole dataset (0 when degraded)
    pub total_labeled: usize,
    /// False when the store read failed and prior-label hints are missing
    pub prior_labels_available: bool,
    pub items: Vec<AnnotatedListing>,
}

/// Single-annotator labeling session
///
/// Holds an immutable dataset handle and the staged (not yet submitted)
/// selections for the current page. Selections are only persisted as a whole
/// page via [`Session::submit`]; navigation never persists anything.
pub struct Session {
    dataset: Arc<Dataset>,
    store: Arc<dyn LabelStore>,
    page_size: usize,
    page_number: usize,
    draft: HashMap<String, Label>,
    policy: UnlabeledPolicy,
}

impl Session {
    /// Start a session on page 1
    pub fn new(
        dataset: Arc<Dataset>,
        store: Arc<dyn LabelStore>,
        page_size: usize,
        policy: UnlabeledPolicy,
    ) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::InvalidInput(
                "page size must be positive".to_string(),
            ));
        }
        if dataset.is_empty() {
            return Err(DomainError::DatasetLoad("dataset is empty".to_string()));
        }
        Ok(Self {
            dataset,
            store,
            page_size,
            page_number: 1,
            draft: HashMap::new(),
            policy,
        })
    }

    pub fn current_page(&self) -> usize {
        self.page_number
    }

    pub fn page_count(&self) -> usize {
        self.dataset.page_count(self.page_size)
    }

    pub fn dataset_size(&self) -> usize {
        self.dataset.len()
    }

    /// Navigate to another page, dropping any staged selections
    ///
    /// No persistence happens here; unsaved selections are intentionally
    /// discarded, matching the all-or-nothing form semantics.
    pub fn goto_page(&mut self, page_number: usize) -> DomainResult<()> {
        if page_number < 1 || page_number > self.page_count() {
            return Err(DomainError::InvalidInput(format!(
                "page {} out of range 1..={}",
                page_number,
                self.page_count()
            )));
        }
        if page_number != self.page_number {
            self.page_number = page_number;
            self.draft.clear();
        }
        Ok(())
    }

    /// Render the current page, merging in previously stored labels
    ///
    /// A store read failure does not fail the render: the page comes back
    /// with every item unannotated and `prior_labels_available = false`.
    pub async fn page_view(&self) -> PageView {
        let page = self.dataset.page(self.page_size, self.page_number);
        let keys: Vec<String> = page.iter().map(|l| l.key.clone()).collect();

        let (prior, total_labeled, available) = match self.fetch_prior(&keys).await {
            Ok((prior, total)) => (prior, total, true),
            Err(e) => {
                tracing::warn!(error = %e, "label store unavailable; rendering page without prior labels");
                (Vec::new(), 0, false)
            }
        };

        PageView {
            page_number: self.page_number,
            page_count: self.page_count(),
            total_labeled,
            prior_labels_available: available,
            items: merge_labels(page, &prior),
        }
    }

    async fn fetch_prior(&self, keys: &[String]) -> DomainResult<(Vec<LabelRecord>, usize)> {
        let prior = self.store.fetch_by_keys(keys).await?;
        let total = self.store.count_labeled().await?;
        Ok((prior, total))
    }

    /// Stage one selection for an item on the current page
    pub fn stage(&mut self, key: &str, label: Label) -> DomainResult<()> {
        let page = self.dataset.page(self.page_size, self.page_number);
        if !page.iter().any(|l| l.key == key) {
            return Err(DomainError::InvalidInput(format!(
                "key '{}' is not on page {}",
                key, self.page_number
            )));
        }
        self.draft.insert(key.to_string(), label);
        Ok(())
    }

    /// Stage a set of selections, all of which must be on the current page
    pub fn stage_many<I>(&mut self, selections: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = (String, Label)>,
    {
        for (key, label) in selections {
            self.stage(&key, label)?;
        }
        Ok(())
    }

    /// Submit the current page as one batch
    ///
    /// On success the session stays on the same page with its draft intact,
    /// now matching stored state; resubmitting is safe. On failure nothing is
    /// written and the draft is preserved so the annotator can retry.
    pub async fn submit(&mut self) -> DomainResult<SubmitOutcome> {
        let page = self.dataset.page(self.page_size, self.page_number);
        let now = Utc::now();

        let (records, defaulted_keys) = build_batch(page, &self.draft, self.policy, now)?;
        self.store.put_many(&records).await?;

        tracing::info!(
            page = self.page_number,
            saved = records.len(),
            defaulted = defaulted_keys.len(),
            "page submitted"
        );

        Ok(SubmitOutcome {
            saved: records.len(),
            defaulted_keys,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LabelRecord, Listing};
    use crate::repository::{init_db, LabelRepository};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use tokio::sync::Mutex;

    fn listing(n: usize) -> Listing {
        Listing::new(
            format!("https://example.com/item/{}", n),
            format!("Item {}", n),
            1_000.0 + n as f64,
            "Jakarta".to_string(),
            "2 sold".to_string(),
        )
    }

    fn dataset(n: usize) -> Arc<Dataset> {
        Arc::new(Dataset::new((0..n).map(listing).collect()))
    }

    async fn sqlite_store() -> Arc<dyn LabelStore> {
        let conn = init_db(&PathBuf::from(":memory:")).await.expect("init db");
        Arc::new(LabelRepository::new(Arc::new(Mutex::new(conn))))
    }

    /// Store whose reads always fail, for degradation tests
    struct FailingStore;

    #[async_trait]
    impl LabelStore for FailingStore {
        async fn put_many(&self, _records: &[LabelRecord]) -> DomainResult<()> {
            Err(DomainError::StoreWrite("connection refused".to_string()))
        }

        async fn fetch_all(&self) -> DomainResult<Vec<LabelRecord>> {
            Err(DomainError::StoreRead("connection refused".to_string()))
        }

        async fn fetch_by_keys(&self, _keys: &[String]) -> DomainResult<Vec<LabelRecord>> {
            Err(DomainError::StoreRead("connection refused".to_string()))
        }

        async fn count_labeled(&self) -> DomainResult<usize> {
            Err(DomainError::StoreRead("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_session_starts_on_page_one() {
        let session = Session::new(dataset(45), sqlite_store().await, 20, UnlabeledPolicy::Reject)
            .expect("session");
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.page_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_dataset_rejected() {
        let result = Session::new(dataset(0), sqlite_store().await, 20, UnlabeledPolicy::Reject);
        assert!(matches!(result, Err(DomainError::DatasetLoad(_))));
    }

    #[tokio::test]
    async fn test_navigation_bounds() {
        let mut session =
            Session::new(dataset(45), sqlite_store().await, 20, UnlabeledPolicy::Reject).unwrap();

        session.goto_page(3).expect("last page is valid");
        assert!(session.goto_page(0).is_err());
        assert!(session.goto_page(4).is_err());
        assert_eq!(session.current_page(), 3);
    }

    #[tokio::test]
    async fn test_navigation_clears_draft() {
        let mut session =
            Session::new(dataset(45), sqlite_store().await, 20, UnlabeledPolicy::DefaultLegal)
                .unwrap();

        session
            .stage("https://example.com/item/0", Label::Illegal)
            .unwrap();
        session.goto_page(2).unwrap();
        session.goto_page(1).unwrap();

        // The earlier selection was dropped on navigation, so it gets defaulted
        let outcome = session.submit().await.expect("submit");
        assert!(outcome
            .defaulted_keys
            .contains(&"https://example.com/item/0".to_string()));
    }

    #[tokio::test]
    async fn test_stage_rejects_key_off_page() {
        let mut session =
            Session::new(dataset(45), sqlite_store().await, 20, UnlabeledPolicy::Reject).unwrap();

        let err = session
            .stage("https://example.com/item/40", Label::Legal)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_submit_roundtrip_and_merge() {
        let store = sqlite_store().await;
        let mut session =
            Session::new(dataset(25), store, 20, UnlabeledPolicy::Reject).unwrap();

        for n in 0..20 {
            let label = if n % 2 == 0 { Label::Legal } else { Label::Illegal };
            session
                .stage(&format!("https://example.com/item/{}", n), label)
                .unwrap();
        }
        let outcome = session.submit().await.expect("submit");
        assert_eq!(outcome.saved, 20);
        assert!(outcome.defaulted_keys.is_empty());

        // Session stays on the submitted page
        assert_eq!(session.current_page(), 1);

        let view = session.page_view().await;
        assert!(view.prior_labels_available);
        assert_eq!(view.total_labeled, 20);
        assert!(view.items.iter().all(|i| i.was_previously_labeled));
        assert_eq!(view.items[1].previous_label, Some(Label::Illegal));
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_page() {
        let mut session =
            Session::new(dataset(25), sqlite_store().await, 20, UnlabeledPolicy::Reject).unwrap();

        session
            .stage("https://example.com/item/0", Label::Legal)
            .unwrap();
        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_resubmit_overwrites_labels() {
        let store = sqlite_store().await;
        let mut session = Session::new(dataset(5), store, 20, UnlabeledPolicy::Reject).unwrap();

        for n in 0..5 {
            session
                .stage(&format!("https://example.com/item/{}", n), Label::Legal)
                .unwrap();
        }
        session.submit().await.unwrap();

        session
            .stage("https://example.com/item/2", Label::Illegal)
            .unwrap();
        session.submit().await.unwrap();

        let view = session.page_view().await;
        assert_eq!(view.total_labeled, 5, "upsert keeps one record per key");
        assert_eq!(view.items[2].previous_label, Some(Label::Illegal));
    }

    #[tokio::test]
    async fn test_render_degrades_when_store_unavailable() {
        let session = Session::new(
            dataset(25),
            Arc::new(FailingStore),
            20,
            UnlabeledPolicy::Reject,
        )
        .unwrap();

        let view = session.page_view().await;
        assert!(!view.prior_labels_available);
        assert_eq!(view.total_labeled, 0);
        assert_eq!(view.items.len(), 20);
        assert!(view.items.iter().all(|i| !i.was_previously_labeled));
    }

    #[tokio::test]
    async fn test_submit_failure_surfaces_and_keeps_draft() {
        let mut session = Session::new(
            dataset(5),
            Arc::new(FailingStore),
            20,
            UnlabeledPolicy::DefaultLegal,
        )
        .unwrap();

        session
            .stage("https://example.com/item/0", Label::Illegal)
            .unwrap();
        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, DomainError::StoreWrite(_)));

        // Draft survives the failed write, so retrying needs no re-entry
        let retry = session.submit().await.unwrap_err();
        assert!(matches!(retry, DomainError::StoreWrite(_)));
    }
}
