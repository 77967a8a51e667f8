//! Incoming shipment queue
//!
//! Shipments announced by the office wait here until the warehouse accepts
//! them onto a location. Accepting is the ledger service's `receive`; this
//! service only manages the queue itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct IncomingMaterialDetails {
    pub incoming_material_id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub program_id: Option<i32>,
    pub stock_id: String,
    pub material_type: String,
    pub description: String,
    pub quantity: i32,
    pub cost: Decimal,
    pub min_required_quantity: i32,
    pub max_required_quantity: i32,
    pub owner: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendIntakeInput {
    pub customer_id: i32,

    /// Billing program the shipment belongs to, when known.
    pub program_id: Option<i32>,

    #[validate(length(min = 1, message = "Stock ID is required"))]
    pub stock_id: String,

    #[validate(length(min = 1, message = "Material type is required"))]
    pub material_type: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    pub cost: Decimal,

    #[validate(range(min = 0))]
    pub min_required_quantity: i32,

    #[validate(range(min = 0))]
    pub max_required_quantity: i32,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub owner: String,

    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateIntakeInput {
    pub quantity: Option<i32>,
    pub cost: Option<Decimal>,
    pub description: Option<String>,
    pub min_required_quantity: Option<i32>,
    pub max_required_quantity: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IntakeFilter {
    pub customer_id: Option<i32>,
    pub stock_id: Option<String>,
}

/// Pending shipments split between counted warehouse stock and vault items
/// that are tracked elsewhere.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PendingCounts {
    pub tracked: i64,
    pub untracked: i64,
}

#[derive(Clone)]
pub struct IntakeService {
    db: PgPool,
}

impl IntakeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Announce a shipment. Returns its queue id.
    pub async fn send(&self, input: SendIntakeInput, user_id: i32) -> AppResult<i32> {
        input.validate()?;

        if input.cost < Decimal::ZERO {
            return Err(AppError::validation("cost", "Cost must not be negative"));
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO incoming_materials
                (customer_id, program_id, stock_id, material_type, description,
                 quantity, cost, min_required_quantity, max_required_quantity,
                 owner, is_primary, user_id)
            VALUES ($1, $2, $3, $4::material_type, $5, $6, $7, $8, $9,
                    $10::owner, $11, $12)
            RETURNING incoming_material_id
            "#,
        )
        .bind(input.customer_id)
        .bind(input.program_id)
        .bind(&input.stock_id)
        .bind(&input.material_type)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(input.cost)
        .bind(input.min_required_quantity)
        .bind(input.max_required_quantity)
        .bind(&input.owner)
        .bind(input.is_primary)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            incoming_material_id = id,
            stock_id = %input.stock_id,
            quantity = input.quantity,
            "shipment announced"
        );

        Ok(id)
    }

    /// Shipments still waiting to be accepted, oldest first.
    pub async fn list(&self, filter: IntakeFilter) -> AppResult<Vec<IncomingMaterialDetails>> {
        let shipments = sqlx::query_as::<_, IncomingMaterialDetails>(
            r#"
            SELECT im.incoming_material_id, im.customer_id, c.name AS customer_name,
                   im.program_id,
                   im.stock_id, im.material_type::TEXT AS material_type, im.description,
                   im.quantity, im.cost, im.min_required_quantity,
                   im.max_required_quantity, im.owner::TEXT AS owner, im.is_primary,
                   im.created_at
            FROM incoming_materials im
            JOIN customers c ON c.customer_id = im.customer_id
            WHERE ($1::INT IS NULL OR im.customer_id = $1)
              AND ($2::TEXT IS NULL OR im.stock_id = $2)
            ORDER BY im.created_at ASC
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.stock_id)
        .fetch_all(&self.db)
        .await?;

        Ok(shipments)
    }

    /// Correct an announced shipment before the warehouse accepts it.
    pub async fn update(&self, id: i32, input: UpdateIntakeInput) -> AppResult<()> {
        if let Some(quantity) = input.quantity {
            if quantity < 1 {
                return Err(AppError::validation(
                    "quantity",
                    "Quantity must be at least 1",
                ));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE incoming_materials
            SET quantity = COALESCE($1, quantity),
                cost = COALESCE($2, cost),
                description = COALESCE($3, description),
                min_required_quantity = COALESCE($4, min_required_quantity),
                max_required_quantity = COALESCE($5, max_required_quantity),
                updated_at = NOW()
            WHERE incoming_material_id = $6
            "#,
        )
        .bind(input.quantity)
        .bind(input.cost)
        .bind(input.description)
        .bind(input.min_required_quantity)
        .bind(input.max_required_quantity)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Incoming material".to_string()));
        }

        Ok(())
    }

    /// Withdraw an announced shipment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM incoming_materials WHERE incoming_material_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Incoming material".to_string()));
        }

        Ok(())
    }

    /// Count the queue, splitting out the vault material types.
    pub async fn pending_counts(&self, untracked_types: &[String]) -> AppResult<PendingCounts> {
        let counts = sqlx::query_as::<_, PendingCounts>(
            r#"
            SELECT COUNT(*) FILTER (WHERE NOT (material_type::TEXT = ANY($1))) AS tracked,
                   COUNT(*) FILTER (WHERE material_type::TEXT = ANY($1)) AS untracked
            FROM incoming_materials
            "#,
        )
        .bind(untracked_types)
        .fetch_one(&self.db)
        .await?;

        Ok(counts)
    }
}
