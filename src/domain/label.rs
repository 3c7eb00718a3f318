//! Label Entities
//!
//! The binary label an annotator assigns to a listing, and the persisted
//! record the label store keeps per item key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::listing::Listing;

/// Binary annotation decision for one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legal,
    Illegal,
}

impl Label {
    /// Numeric form used by the store (0 = legal, 1 = illegal)
    pub fn as_i64(&self) -> i64 {
        match self {
            Label::Legal => 0,
            Label::Illegal => 1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Label::Legal),
            1 => Some(Label::Illegal),
            _ => None,
        }
    }
}

/// One persisted labeling decision
///
/// The store keeps exactly one current record per key; a later `put_many`
/// for the same key overwrites the earlier record. Listing fields are
/// denormalized into the record so the stored table is self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRecord {
    pub key: String,
    pub label: Label,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub price: f64,
    pub location: String,
    pub sold: String,
}

impl LabelRecord {
    /// Build a record for a listing, stamped with the given submission time
    pub fn new(listing: &Listing, label: Label, timestamp: DateTime<Utc>) -> Self {
        Self {
            key: listing.key.clone(),
            label,
            timestamp,
            title: listing.title.clone(),
            price: listing.price,
            location: listing.location.clone(),
            sold: listing.sold.clone(),
        }
    }
}
