//! Material requests from production
//!
//! Production crews ask for stock by id; the warehouse works the queue and
//! records how much was actually handed out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RequestedMaterial {
    pub request_id: i32,
    pub stock_id: String,
    pub description: String,
    pub quantity_requested: i32,
    pub quantity_used: i32,
    pub status: String,
    pub notes: String,
    pub requested_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a request batch.
#[derive(Debug, Deserialize)]
pub struct RequestItem {
    pub stock_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestFilter {
    pub status: Option<String>,
    pub stock_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequestInput {
    pub quantity_used: Option<i32>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct RequestService {
    db: PgPool,
}

impl RequestService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// File a batch of request lines, all pending. The whole batch lands or
    /// none of it does.
    pub async fn create_batch(&self, items: Vec<RequestItem>, user_id: i32) -> AppResult<()> {
        if items.is_empty() {
            return Err(AppError::validation(
                "items",
                "A request needs at least one line",
            ));
        }

        for item in &items {
            if item.quantity < 1 {
                return Err(AppError::validation(
                    "quantity",
                    format!("Quantity for {} must be at least 1", item.stock_id),
                ));
            }
        }

        let mut tx = self.db.begin().await?;

        for item in &items {
            // The description is denormalized from the catalog so the queue
            // stays readable after a material is retired.
            let description = sqlx::query_scalar::<_, String>(
                "SELECT description FROM materials WHERE stock_id = $1 LIMIT 1",
            )
            .bind(&item.stock_id)
            .fetch_optional(&mut *tx)
            .await?
            .unwrap_or_default();

            sqlx::query(
                r#"
                INSERT INTO requested_materials
                    (stock_id, description, quantity_requested, quantity_used,
                     status, notes, user_id)
                VALUES ($1, $2, $3, 0, 'pending', $4, $5)
                "#,
            )
            .bind(&item.stock_id)
            .bind(&description)
            .bind(item.quantity)
            .bind(item.notes.clone().unwrap_or_default())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(lines = items.len(), user_id, "material request filed");

        Ok(())
    }

    pub async fn list(&self, filter: RequestFilter) -> AppResult<Vec<RequestedMaterial>> {
        let requests = sqlx::query_as::<_, RequestedMaterial>(
            r#"
            SELECT request_id, stock_id, description, quantity_requested,
                   quantity_used, status, notes, requested_at, updated_at
            FROM requested_materials
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR stock_id = $2)
            ORDER BY requested_at ASC
            "#,
        )
        .bind(filter.status)
        .bind(filter.stock_id)
        .fetch_all(&self.db)
        .await?;

        Ok(requests)
    }

    /// Record progress on a request line: how much went out, or a status
    /// change (delivered, declined).
    pub async fn update(&self, request_id: i32, input: UpdateRequestInput) -> AppResult<()> {
        if input.quantity_used.is_none() && input.status.is_none() {
            return Err(AppError::validation("input", "Nothing to update"));
        }

        if let Some(quantity_used) = input.quantity_used {
            if quantity_used < 0 {
                return Err(AppError::validation(
                    "quantity_used",
                    "Quantity used must not be negative",
                ));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE requested_materials
            SET quantity_used = COALESCE($1, quantity_used),
                status = COALESCE($2, status),
                updated_at = NOW()
            WHERE request_id = $3
            "#,
        )
        .bind(input.quantity_used)
        .bind(input.status)
        .bind(request_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Requested material".to_string()));
        }

        Ok(())
    }

    /// How many request lines still wait on the warehouse.
    pub async fn pending_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM requested_materials WHERE status = 'pending'",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}
