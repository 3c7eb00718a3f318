//! Label Repository Implementation
//!
//! SQLite-backed implementation of the LabelStore trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Row};
use tokio::sync::Mutex;

use super::traits::LabelStore;
use crate::domain::{DomainError, DomainResult, Label, LabelRecord};

const RECORD_COLUMNS: &str = "key, label, timestamp, title, price, location, sold";

/// SQLite implementation of the label store
pub struct LabelRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LabelRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl LabelStore for LabelRepository {
    async fn put_many(&self, records: &[LabelRecord]) -> DomainResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let conn = self.conn.lock().await;

        // The page is the unit of persistence: either every record in the
        // batch lands or none does.
        conn.execute("BEGIN", ())
            .await
            .map_err(|e| DomainError::StoreWrite(e.to_string()))?;

        for record in records {
            let result = conn
                .execute(
                    "INSERT INTO labels (key, label, timestamp, title, price, location, sold)
                     VALUES (?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(key) DO UPDATE SET
                        label = excluded.label,
                        timestamp = excluded.timestamp,
                        title = excluded.title,
                        price = excluded.price,
                        location = excluded.location,
                        sold = excluded.sold",
                    libsql::params![
                        record.key.clone(),
                        record.label.as_i64(),
                        record.timestamp.to_rfc3339(),
                        record.title.clone(),
                        record.price,
                        record.location.clone(),
                        record.sold.clone()
                    ],
                )
                .await;

            if let Err(e) = result {
                let _ = conn.execute("ROLLBACK", ()).await;
                return Err(DomainError::StoreWrite(e.to_string()));
            }
        }

        if let Err(e) = conn.execute("COMMIT", ()).await {
            // Leave no transaction open, or every later batch fails on BEGIN
            let _ = conn.execute("ROLLBACK", ()).await;
            return Err(DomainError::StoreWrite(e.to_string()));
        }

        Ok(())
    }

    async fn fetch_all(&self) -> DomainResult<Vec<LabelRecord>> {
        let conn = self.conn.lock().await;

        let mut rows = conn
            .query(
                &format!("SELECT {} FROM labels ORDER BY key", RECORD_COLUMNS),
                (),
            )
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?
        {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn fetch_by_keys(&self, keys: &[String]) -> DomainResult<Vec<LabelRecord>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn.lock().await;

        let placeholders = vec!["?"; keys.len()].join(", ");
        let query = format!(
            "SELECT {} FROM labels WHERE key IN ({}) ORDER BY key",
            RECORD_COLUMNS, placeholders
        );

        let mut rows = conn
            .query(&query, libsql::params_from_iter(keys.iter().cloned()))
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?
        {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn count_labeled(&self) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        let mut rows = conn
            .query("SELECT COUNT(*) FROM labels", ())
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::StoreRead(e.to_string()))?
        {
            let count = row
                .get::<i64>(0)
                .map_err(|e| DomainError::StoreRead(e.to_string()))?;
            Ok(count as usize)
        } else {
            Ok(0)
        }
    }
}

/// Convert a database row to a LabelRecord
fn row_to_record(row: &Row) -> DomainResult<LabelRecord> {
    let get_err = |e: libsql::Error| DomainError::StoreRead(e.to_string());

    let label_raw = row.get::<i64>(1).map_err(get_err)?;
    let label = Label::from_i64(label_raw)
        .ok_or_else(|| DomainError::StoreRead(format!("unknown label value {}", label_raw)))?;

    let timestamp_raw = row.get::<String>(2).map_err(get_err)?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp_raw)
        .map_err(|e| DomainError::StoreRead(format!("bad timestamp '{}': {}", timestamp_raw, e)))?
        .with_timezone(&Utc);

    Ok(LabelRecord {
        key: row.get::<String>(0).map_err(get_err)?,
        label,
        timestamp,
        title: row.get::<String>(3).map_err(get_err)?,
        price: row.get::<f64>(4).map_err(get_err)?,
        location: row.get::<String>(5).map_err(get_err)?,
        sold: row.get::<String>(6).map_err(get_err)?,
    })
}
