use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ComplaintStore;
use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{Complaint, ComplaintPatch, NewComplaint, SortOrder};

const COMPLAINT_COLUMNS: &str = r#"
    id, title, description, category, status, location,
    latitude, longitude, image_url, citizen_name, remark,
    created_at, updated_at
"#;

/// PostgreSQL-backed complaint store
pub struct PgComplaintStore {
    pool: PgPool,
}

impl PgComplaintStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintStore for PgComplaintStore {
    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Complaint>> {
        let order = match sort {
            Some(SortOrder::CreatedAtDesc) => "created_at DESC, id DESC",
            None | Some(SortOrder::CreatedAtAsc) => "created_at ASC, id ASC",
        };
        let sql = format!(
            "SELECT {} FROM complaints ORDER BY {}",
            COMPLAINT_COLUMNS, order
        );

        sqlx::query_as::<_, Complaint>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list complaints: {:?}", e);
                AppError::storage(e)
            })
    }

    async fn insert(
        &self,
        id: Uuid,
        data: &NewComplaint,
        idempotency_key: Option<&str>,
    ) -> Result<Complaint> {
        let sql = format!(
            r#"
            INSERT INTO complaints (
                id, title, description, category, status, location,
                latitude, longitude, image_url, citizen_name, idempotency_key
            )
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $10)
            ON CONFLICT (idempotency_key) DO NOTHING
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        );

        let inserted = sqlx::query_as::<_, Complaint>(&sql)
            .bind(id)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.category)
            .bind(&data.location)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(&data.image_url)
            .bind(&data.citizen_name)
            .bind(idempotency_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create complaint: {:?}", e);
                AppError::storage(e)
            })?;

        if let Some(complaint) = inserted {
            return Ok(complaint);
        }

        // Nothing inserted means the idempotency key was already taken
        let key = idempotency_key.ok_or_else(|| {
            AppError::Internal(format!("Insert of complaint {} returned no row", id))
        })?;
        let existing = self.find_by_idempotency_key(key).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Idempotency key '{}' conflicted but no complaint holds it",
                key
            ))
        })?;

        tracing::debug!("Idempotent replay for key '{}': {}", key, existing.id);
        Ok(existing)
    }

    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Complaint>> {
        let sql = format!(
            "SELECT {} FROM complaints WHERE idempotency_key = $1",
            COMPLAINT_COLUMNS
        );

        sqlx::query_as::<_, Complaint>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up idempotency key: {:?}", e);
                AppError::storage(e)
            })
    }

    async fn update(&self, id: Uuid, patch: &ComplaintPatch) -> Result<Complaint> {
        let sql = format!(
            r#"
            UPDATE complaints
            SET status = COALESCE($2, status),
                remark = COALESCE($3, remark),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        );

        sqlx::query_as::<_, Complaint>(&sql)
            .bind(id)
            .bind(patch.status)
            .bind(&patch.remark)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update complaint: {:?}", e);
                AppError::storage(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", id)))
    }
}
