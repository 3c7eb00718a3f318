//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for label persistence.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, LabelRecord};

/// Key-value persistence for labeling decisions
///
/// One current record per key. `put_many` is an upsert: a later batch for
/// the same key overwrites the earlier record, with no history kept. There
/// is no locking or conflict detection across writers; the last write wins.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Upsert a batch of records by key, all-or-nothing
    async fn put_many(&self, records: &[LabelRecord]) -> DomainResult<()>;

    /// Every stored record
    async fn fetch_all(&self) -> DomainResult<Vec<LabelRecord>>;

    /// Stored records for the given keys only
    ///
    /// Keyed read for the page render path, so navigating does not scan the
    /// whole store. Observable merge behavior matches a full scan.
    async fn fetch_by_keys(&self, keys: &[String]) -> DomainResult<Vec<LabelRecord>>;

    /// Number of items labeled so far
    async fn count_labeled(&self) -> DomainResult<usize>;
}
