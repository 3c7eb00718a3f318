//! Listing Labeler Backend
//!
//! Layered architecture:
//! - domain: Core entities and pure business rules (labels, pagination)
//! - dataset: CSV loader producing the immutable listing dataset
//! - repository: Label store abstraction and SQLite implementation
//! - session: Annotator session state, label merge and page submission
//! - api: HTTP handlers bridging the annotator's client to the session

pub mod api;
pub mod dataset;
pub mod domain;
pub mod repository;
pub mod session;

use tokio::sync::Mutex;

use session::Session;

/// Application state shared across handlers
///
/// The session is a single-annotator resource; the mutex serializes the
/// render/submit cycle, there is no finer-grained concurrency to manage.
pub struct AppState {
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}
