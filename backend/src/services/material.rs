//! Material catalog queries
//!
//! Read-side queries over material rows plus the small writes that do not
//! touch quantities (status changes). Anything that changes a quantity goes
//! through the ledger service instead.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// A material row joined with the names a client wants to display.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MaterialDetails {
    pub material_id: i32,
    pub stock_id: String,
    pub customer_id: i32,
    pub customer_name: String,
    pub program_id: Option<i32>,
    pub program_name: Option<String>,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
    pub warehouse_name: Option<String>,
    pub material_type: String,
    pub description: String,
    pub notes: String,
    pub quantity: i32,
    pub min_required_quantity: i32,
    pub max_required_quantity: i32,
    pub status: String,
    pub owner: String,
    pub is_primary: bool,
    pub serial_number_range: String,
    pub updated_at: DateTime<Utc>,
}

/// Optional filters for the material list. Absent fields match everything.
#[derive(Debug, Default, Deserialize)]
pub struct MaterialFilter {
    pub stock_id: Option<String>,
    pub customer_id: Option<i32>,
    pub program_id: Option<i32>,
    pub location_id: Option<i32>,
    pub material_type: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Totals for one stock item across all its locations.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GroupedMaterial {
    pub stock_id: String,
    pub description: String,
    pub material_type: String,
    pub owner: String,
    pub total_quantity: i64,
    pub location_count: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UsageReason {
    pub reason_id: i32,
    pub name: String,
}

/// A negative audit leg looked up by its job ticket.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TicketTransaction {
    pub transaction_id: i64,
    pub price_id: i32,
    pub stock_id: String,
    pub quantity_change: i32,
    pub cost: Decimal,
    pub notes: String,
    pub serial_number_range: String,
    pub reason_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

impl MaterialService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List materials with display names, newest change first.
    pub async fn list(&self, filter: MaterialFilter) -> AppResult<Vec<MaterialDetails>> {
        let materials = sqlx::query_as::<_, MaterialDetails>(
            r#"
            SELECT m.material_id, m.stock_id, m.customer_id, c.name AS customer_name,
                   m.program_id, p.program_name,
                   m.location_id, l.name AS location_name, w.name AS warehouse_name,
                   m.material_type::TEXT AS material_type, m.description, m.notes,
                   m.quantity, m.min_required_quantity, m.max_required_quantity,
                   m.status, m.owner::TEXT AS owner, m.is_primary,
                   m.serial_number_range, m.updated_at
            FROM materials m
            JOIN customers c ON c.customer_id = m.customer_id
            LEFT JOIN customer_programs p ON p.program_id = m.program_id
            LEFT JOIN locations l ON l.location_id = m.location_id
            LEFT JOIN warehouses w ON w.warehouse_id = l.warehouse_id
            WHERE ($1::TEXT IS NULL OR m.stock_id = $1)
              AND ($2::INT IS NULL OR m.customer_id = $2)
              AND ($3::INT IS NULL OR m.program_id = $3)
              AND ($4::INT IS NULL OR m.location_id = $4)
              AND ($5::TEXT IS NULL OR m.material_type::TEXT = $5)
              AND ($6::TEXT IS NULL OR m.status = $6)
              AND ($7::TEXT IS NULL OR m.description ILIKE '%' || $7 || '%')
            ORDER BY m.updated_at DESC
            "#,
        )
        .bind(filter.stock_id)
        .bind(filter.customer_id)
        .bind(filter.program_id)
        .bind(filter.location_id)
        .bind(filter.material_type)
        .bind(filter.status)
        .bind(filter.description)
        .fetch_all(&self.db)
        .await?;

        Ok(materials)
    }

    /// Totals per stock item, summed over every location it sits on.
    pub async fn grouped(&self) -> AppResult<Vec<GroupedMaterial>> {
        let groups = sqlx::query_as::<_, GroupedMaterial>(
            r#"
            SELECT stock_id,
                   MIN(description) AS description,
                   MIN(material_type::TEXT) AS material_type,
                   MIN(owner::TEXT) AS owner,
                   SUM(quantity)::BIGINT AS total_quantity,
                   COUNT(location_id)::BIGINT AS location_count
            FROM materials
            GROUP BY stock_id
            ORDER BY stock_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(groups)
    }

    /// The labels of the `material_type` enum, in declaration order.
    pub async fn material_types(&self) -> AppResult<Vec<String>> {
        let types = sqlx::query_scalar::<_, String>(
            r#"
            SELECT pe.enumlabel
            FROM pg_enum pe
            LEFT JOIN pg_type pt ON pt.oid = pe.enumtypid
            WHERE pt.typname = 'material_type'
            ORDER BY pe.enumsortorder
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(types)
    }

    /// Reasons a removal can cite.
    pub async fn usage_reasons(&self) -> AppResult<Vec<UsageReason>> {
        let reasons = sqlx::query_as::<_, UsageReason>(
            "SELECT reason_id, name FROM material_usage_reasons ORDER BY reason_id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(reasons)
    }

    /// Change the workflow status of every row carrying a stock id.
    pub async fn update_status(&self, stock_id: &str, status: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE materials SET status = $1, updated_at = NOW() WHERE stock_id = $2",
        )
        .bind(status)
        .bind(stock_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Material".to_string()));
        }

        Ok(result.rows_affected())
    }

    /// The consumption legs booked under one job ticket.
    pub async fn transactions_by_ticket(
        &self,
        job_ticket: &str,
    ) -> AppResult<Vec<TicketTransaction>> {
        let transactions = sqlx::query_as::<_, TicketTransaction>(
            r#"
            SELECT transaction_id, price_id, stock_id, quantity_change, cost, notes,
                   serial_number_range, reason_id, created_at
            FROM transactions_log
            WHERE job_ticket = $1 AND quantity_change < 0
            ORDER BY transaction_id
            "#,
        )
        .bind(job_ticket)
        .fetch_all(&self.db)
        .await?;

        Ok(transactions)
    }

    /// Look up the catalog description for a stock id.
    pub async fn description_by_stock_id(&self, stock_id: &str) -> AppResult<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT description FROM materials WHERE stock_id = $1 LIMIT 1",
        )
        .bind(stock_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Material".to_string()))
    }
}
