//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde/chrono for data).

mod error;
mod label;
mod listing;
pub mod page;

pub use error::{DomainError, DomainResult};
pub use label::{Label, LabelRecord};
pub use listing::Listing;
