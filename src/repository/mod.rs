//! Repository Layer
//!
//! Label store abstraction and its SQLite implementation.

mod db;
mod label_repo;
mod traits;


pub use db::init_db;
pub use label_repo::LabelRepository;
pub use traits::LabelStore;
