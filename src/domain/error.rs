//! Domain Layer - Errors
//!
//! Common error and result types shared by every layer above the domain.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Variants follow the failure boundaries of the labeling workflow:
/// dataset loading is fatal, store reads degrade the page render, store
/// writes fail the submission as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    DatasetLoad(String),
    InvalidInput(String),
    StoreRead(String),
    StoreWrite(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::DatasetLoad(msg) => write!(f, "Dataset load failed: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::StoreRead(msg) => write!(f, "Label store read failed: {}", msg),
            DomainError::StoreWrite(msg) => write!(f, "Label store write failed: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
