//! Database Connection and Setup
//!
//! Opens the SQLite label database and runs migrations.

use std::path::Path;

use libsql::{Builder, Connection};

use crate::domain::{DomainError, DomainResult};

/// Open (or create) the label database at `db_path` and migrate it
///
/// Pass `:memory:` for an in-memory database (used by tests).
pub async fn init_db(db_path: &Path) -> DomainResult<Connection> {
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| DomainError::Internal("Invalid DB path".to_string()))?;

    let db = Builder::new_local(db_path_str)
        .build()
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to build db: {}", e)))?;

    let conn = db
        .connect()
        .map_err(|e| DomainError::Internal(format!("Failed to connect: {}", e)))?;

    run_migrations(&conn).await?;

    Ok(conn)
}

/// Run database migrations
async fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // One current record per key; put_many upserts into this table.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS labels (
            key TEXT PRIMARY KEY,
            label INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            title TEXT NOT NULL,
            price REAL NOT NULL,
            location TEXT NOT NULL,
            sold TEXT NOT NULL
        )",
        (),
    )
    .await
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_labels_label ON labels(label)",
        (),
    )
    .await
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
