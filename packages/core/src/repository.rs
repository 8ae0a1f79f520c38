//! Document store backed by SQLite.
//!
//! Every record lives in the single `documents` table as a JSON body keyed
//! by `(collection, id)`. The document key is not repeated inside the body;
//! [`Document::decode`] injects it back on the way out.
//!
//! [`DocumentRepository`] implements the data source traits the presenters
//! depend on: [`AlertSource`], [`ReadingStore`] and [`VehicleStore`].

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::alerts::decode_alerts;
use crate::document::{decode_documents, Document};
use crate::error::{AppError, AppResult};
use crate::models::{collection, field, AlertItem, OdometerReading, Vehicle};
use crate::services::provider::{AlertSource, ReadingStore, VehicleStore};

/// Bulk data accepted by [`DocumentRepository::import_snapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub alerts: Vec<AlertItem>,
    pub vehicles: Vec<Vehicle>,
    pub readings: Vec<OdometerReading>,
}

/// Counts of records written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub alerts: usize,
    pub vehicles: usize,
    pub readings: usize,
}

/// How a JSON body field is compared in `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    /// Plain string comparison.
    Text(&'a str),
    /// RFC 3339 timestamp compared as an instant. The serialized strings
    /// drop zero fractional seconds and may carry any offset, so they
    /// cannot be compared as text.
    Timestamp(&'a str),
}

impl SortKey<'_> {
    fn sql(&self) -> String {
        match self {
            SortKey::Text(field) => format!("json_extract(body, '$.{}')", field),
            SortKey::Timestamp(field) => format!("julianday(json_extract(body, '$.{}'))", field),
        }
    }
}

pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---- Generic document access ----

    /// Insert a new document. Fails if the key is already taken.
    pub async fn insert_document(
        &self,
        collection: &str,
        id: &str,
        user_id: Option<&str>,
        body: &Value,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO documents (collection, id, user_id, body) VALUES (?, ?, ?, ?)",
        )
        .bind(collection)
        .bind(id)
        .bind(user_id)
        .bind(body.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or overwrite a document.
    pub async fn upsert_document(
        &self,
        collection: &str,
        id: &str,
        user_id: Option<&str>,
        body: &Value,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO documents (collection, id, user_id, body)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (collection, id) DO UPDATE SET
                user_id = excluded.user_id,
                body = excluded.body,
                updated_at = datetime('now')",
        )
        .bind(collection)
        .bind(id)
        .bind(user_id)
        .bind(body.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite an existing document. Returns `false` if the key is unknown.
    pub async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        user_id: Option<&str>,
        body: &Value,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET user_id = ?, body = ?, updated_at = datetime('now')
             WHERE collection = ? AND id = ?",
        )
        .bind(user_id)
        .bind(body.to_string())
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a document was deleted.
    pub async fn delete_document(&self, collection: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let row = sqlx::query("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| row_to_document(collection, &row)).transpose()
    }

    /// Documents in `collection` owned by `user_id`, ordered ascending by
    /// `order_by`, then by id.
    pub async fn list_documents(
        &self,
        collection: &str,
        user_id: &str,
        order_by: SortKey<'_>,
    ) -> AppResult<Vec<Document>> {
        let sql = format!(
            "SELECT id, body FROM documents
             WHERE collection = ? AND user_id = ?
             ORDER BY {} ASC, id ASC",
            order_by.sql()
        );

        let rows = sqlx::query(&sql)
            .bind(collection)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows_to_documents(collection, rows))
    }

    // ---- Alerts ----

    pub async fn save_alert(&self, alert: &AlertItem) -> AppResult<()> {
        let body = record_body(collection::ALERTS, &alert.id, alert)?;
        self.upsert_document(collection::ALERTS, &alert.id, None, &body)
            .await
    }

    // ---- Import ----

    /// Write every record in `snapshot`, replacing existing documents
    /// with the same key.
    pub async fn import_snapshot(&self, snapshot: &Snapshot) -> AppResult<ImportSummary> {
        for alert in &snapshot.alerts {
            self.save_alert(alert).await?;
        }
        for vehicle in &snapshot.vehicles {
            self.save_vehicle(vehicle).await?;
        }
        for reading in &snapshot.readings {
            let body = record_body(collection::ODOMETER_READINGS, &reading.id, reading)?;
            self.upsert_document(
                collection::ODOMETER_READINGS,
                &reading.id,
                Some(&reading.user_id),
                &body,
            )
            .await?;
        }

        let summary = ImportSummary {
            alerts: snapshot.alerts.len(),
            vehicles: snapshot.vehicles.len(),
            readings: snapshot.readings.len(),
        };
        tracing::info!(
            "Imported {} alerts, {} vehicles, {} readings",
            summary.alerts,
            summary.vehicles,
            summary.readings
        );
        Ok(summary)
    }
}

#[async_trait]
impl AlertSource for DocumentRepository {
    async fn fetch_active_alerts(
        &self,
        excluding: &HashSet<String>,
        limit: usize,
    ) -> AppResult<Vec<AlertItem>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, body FROM documents WHERE collection = ");
        query.push_bind(collection::ALERTS);
        query.push(format!(" AND json_extract(body, '$.{}') = 1", field::IS_ON));

        if !excluding.is_empty() {
            query.push(" AND id NOT IN (");
            let mut ids = query.separated(", ");
            for id in excluding {
                ids.push_bind(id.clone());
            }
            ids.push_unseparated(")");
        }

        query.push(format!(
            " ORDER BY {} DESC, id ASC LIMIT ",
            SortKey::Timestamp(field::CREATED_AT).sql()
        ));
        query.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

        let rows = query.build().fetch_all(&self.pool).await?;
        let documents = rows_to_documents(collection::ALERTS, rows);

        Ok(decode_alerts(documents))
    }
}

#[async_trait]
impl ReadingStore for DocumentRepository {
    async fn list_readings(&self, user_id: &str) -> AppResult<Vec<OdometerReading>> {
        let documents = self
            .list_documents(collection::ODOMETER_READINGS, user_id, SortKey::Timestamp(field::DATE))
            .await?;
        Ok(decode_documents(collection::ODOMETER_READINGS, documents))
    }

    async fn create_reading(&self, reading: &OdometerReading) -> AppResult<String> {
        let id = if reading.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            reading.id.clone()
        };

        let body = record_body(collection::ODOMETER_READINGS, &id, reading)?;
        self.insert_document(collection::ODOMETER_READINGS, &id, Some(&reading.user_id), &body)
            .await?;

        tracing::debug!("Created reading {} for vehicle {}", id, reading.vehicle_id);
        Ok(id)
    }

    async fn update_reading(&self, reading: &OdometerReading) -> AppResult<bool> {
        let body = record_body(collection::ODOMETER_READINGS, &reading.id, reading)?;
        self.replace_document(
            collection::ODOMETER_READINGS,
            &reading.id,
            Some(&reading.user_id),
            &body,
        )
        .await
    }

    async fn delete_reading(&self, id: &str) -> AppResult<bool> {
        self.delete_document(collection::ODOMETER_READINGS, id).await
    }
}

#[async_trait]
impl VehicleStore for DocumentRepository {
    async fn list_vehicles(&self, user_id: &str) -> AppResult<Vec<Vehicle>> {
        let documents = self
            .list_documents(collection::VEHICLES, user_id, SortKey::Text("name"))
            .await?;
        Ok(decode_documents(collection::VEHICLES, documents))
    }

    async fn save_vehicle(&self, vehicle: &Vehicle) -> AppResult<()> {
        let body = record_body(collection::VEHICLES, &vehicle.id, vehicle)?;
        self.upsert_document(
            collection::VEHICLES,
            &vehicle.id,
            vehicle.user_id.as_deref(),
            &body,
        )
        .await
    }
}

// ---- Helpers ----

/// Serialize a record into a document body, dropping the `id` field.
fn record_body<T: Serialize>(collection: &str, id: &str, record: &T) -> AppResult<Value> {
    let mut body = serde_json::to_value(record)
        .map_err(|err| AppError::decode(collection, id, err.to_string()))?;
    if let Some(map) = body.as_object_mut() {
        map.remove(field::ID);
    }
    Ok(body)
}

fn row_to_document(collection: &str, row: &SqliteRow) -> AppResult<Document> {
    let id: String = row.try_get("id")?;
    let raw: String = row.try_get("body")?;
    let body = serde_json::from_str(&raw)
        .map_err(|err| AppError::decode(collection, &id, err.to_string()))?;
    Ok(Document { id, body })
}

/// Unreadable rows are logged and skipped, same as undecodable records.
fn rows_to_documents(collection: &str, rows: Vec<SqliteRow>) -> Vec<Document> {
    rows.iter()
        .filter_map(|row| match row_to_document(collection, row) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::warn!("Skipping unreadable row: {}", err);
                None
            }
        })
        .collect()
}
