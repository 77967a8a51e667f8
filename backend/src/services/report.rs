//! Reports over the transaction log
//!
//! Every report here is derived from `transactions_log` rather than the
//! live `materials` rows, so the numbers can be reproduced for any point
//! in time and audited leg by leg.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::task::JoinSet;

use crate::error::{AppError, AppResult};

/// One audit leg with a running balance for its stock id.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TransactionReportRow {
    pub transaction_id: i64,
    pub price_id: i32,
    pub stock_id: String,
    pub quantity_change: i32,
    pub cost: Decimal,
    pub job_ticket: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub running_quantity: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionReportFilter {
    pub customer_id: Option<i32>,
    pub program_id: Option<i32>,
    pub stock_id: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

/// Net quantity and value of one stock item as of a cutoff.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct BalanceRow {
    pub stock_id: String,
    pub description: String,
    pub quantity_on_hand: i64,
    pub total_value: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CustomerBalance {
    pub customer_id: i32,
    pub rows: Vec<BalanceRow>,
}

/// Consumption rate of one stock item over the last six full weeks.
///
/// Internal transfers and vault material types are not usage and are
/// excluded.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WeeklyUsageRow {
    pub stock_id: String,
    pub description: String,
    pub total_used: i64,
    pub avg_weekly_usage: Decimal,
    pub on_hand: i64,
    /// Weeks of stock left at the current burn rate. None when nothing was
    /// consumed in the window.
    pub weeks_remaining: Option<Decimal>,
}

/// One raw audit leg with display names joined in.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TransactionLogRow {
    pub transaction_id: i64,
    pub material_id: i32,
    pub price_id: i32,
    pub stock_id: String,
    pub description: String,
    pub customer_name: String,
    pub quantity_change: i32,
    pub cost: Decimal,
    pub job_ticket: String,
    pub notes: String,
    pub serial_number_range: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

impl ReportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Audit legs in ledger order, each carrying the running quantity of
    /// its stock id within the filtered window.
    pub async fn transactions(
        &self,
        filter: TransactionReportFilter,
    ) -> AppResult<Vec<TransactionReportRow>> {
        let rows = sqlx::query_as::<_, TransactionReportRow>(
            r#"
            SELECT t.transaction_id, t.price_id, t.stock_id, t.quantity_change,
                   t.cost, t.job_ticket, t.notes, t.created_at,
                   SUM(t.quantity_change) OVER (
                       PARTITION BY t.stock_id ORDER BY t.transaction_id
                   )::BIGINT AS running_quantity
            FROM transactions_log t
            JOIN materials m ON m.material_id = t.material_id
            WHERE ($1::INT IS NULL OR m.customer_id = $1)
              AND ($2::INT IS NULL OR m.program_id = $2)
              AND ($3::TEXT IS NULL OR t.stock_id = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR t.created_at >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR t.created_at <= $5)
            ORDER BY t.transaction_id
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.program_id)
        .bind(filter.stock_id)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Net position per stock id as of a cutoff, reconstructed purely from
    /// the audit log.
    pub async fn balance(
        &self,
        as_of: DateTime<Utc>,
        customer_id: Option<i32>,
        program_id: Option<i32>,
    ) -> AppResult<Vec<BalanceRow>> {
        balance_query(&self.db, as_of, customer_id, program_id).await
    }

    /// Balance reports for several customers, computed concurrently.
    pub async fn balances_by_customer(
        &self,
        customer_ids: Vec<i32>,
        as_of: DateTime<Utc>,
    ) -> AppResult<Vec<CustomerBalance>> {
        let mut tasks = JoinSet::new();

        for customer_id in customer_ids {
            let db = self.db.clone();
            tasks.spawn(async move {
                let rows = balance_query(&db, as_of, Some(customer_id), None).await?;
                Ok::<_, AppError>(CustomerBalance { customer_id, rows })
            });
        }

        let mut balances = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let balance = joined.map_err(|e| AppError::InternalError(e.into()))??;
            balances.push(balance);
        }

        balances.sort_by_key(|b| b.customer_id);
        Ok(balances)
    }

    /// Consumption over the last six full weeks, per stock id.
    ///
    /// Only genuine consumption counts: move legs (both directions share
    /// the "Moved ..." note prefix) and the vault material types from the
    /// reporting config are filtered out.
    pub async fn weekly_usage(&self, untracked_types: &[String]) -> AppResult<Vec<WeeklyUsageRow>> {
        let rows = sqlx::query_as::<_, WeeklyUsageRow>(
            r#"
            SELECT t.stock_id,
                   MIN(m.description) AS description,
                   SUM(-t.quantity_change)::BIGINT AS total_used,
                   ROUND(SUM(-t.quantity_change)::NUMERIC / 6, 2) AS avg_weekly_usage,
                   COALESCE(oh.on_hand, 0) AS on_hand,
                   CASE WHEN SUM(-t.quantity_change) > 0 THEN
                       ROUND(COALESCE(oh.on_hand, 0)::NUMERIC * 6
                             / SUM(-t.quantity_change), 1)
                   END AS weeks_remaining
            FROM transactions_log t
            JOIN materials m ON m.material_id = t.material_id
            LEFT JOIN (
                SELECT stock_id, SUM(quantity)::BIGINT AS on_hand
                FROM materials
                GROUP BY stock_id
            ) oh ON oh.stock_id = t.stock_id
            WHERE t.quantity_change < 0
              AND t.notes NOT ILIKE 'moved%'
              AND NOT (m.material_type::TEXT = ANY($1))
              AND t.created_at >= date_trunc('week', NOW()) - INTERVAL '6 weeks'
              AND t.created_at < date_trunc('week', NOW())
            GROUP BY t.stock_id, oh.on_hand
            ORDER BY t.stock_id
            "#,
        )
        .bind(untracked_types)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// The raw audit trail, newest first.
    pub async fn transaction_log(
        &self,
        filter: TransactionReportFilter,
    ) -> AppResult<Vec<TransactionLogRow>> {
        let rows = sqlx::query_as::<_, TransactionLogRow>(
            r#"
            SELECT t.transaction_id, t.material_id, t.price_id, t.stock_id,
                   m.description, c.name AS customer_name,
                   t.quantity_change, t.cost, t.job_ticket, t.notes,
                   t.serial_number_range, r.name AS reason, t.created_at
            FROM transactions_log t
            JOIN materials m ON m.material_id = t.material_id
            JOIN customers c ON c.customer_id = m.customer_id
            LEFT JOIN material_usage_reasons r ON r.reason_id = t.reason_id
            WHERE ($1::INT IS NULL OR m.customer_id = $1)
              AND ($2::INT IS NULL OR m.program_id = $2)
              AND ($3::TEXT IS NULL OR t.stock_id = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR t.created_at >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR t.created_at <= $5)
            ORDER BY t.transaction_id DESC
            LIMIT 1000
            "#,
        )
        .bind(filter.customer_id)
        .bind(filter.program_id)
        .bind(filter.stock_id)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}

async fn balance_query(
    db: &PgPool,
    as_of: DateTime<Utc>,
    customer_id: Option<i32>,
    program_id: Option<i32>,
) -> AppResult<Vec<BalanceRow>> {
    let rows = sqlx::query_as::<_, BalanceRow>(
        r#"
        SELECT t.stock_id,
               MIN(m.description) AS description,
               SUM(t.quantity_change)::BIGINT AS quantity_on_hand,
               SUM(t.quantity_change * t.cost) AS total_value
        FROM transactions_log t
        JOIN materials m ON m.material_id = t.material_id
        WHERE t.created_at <= $1
          AND ($2::INT IS NULL OR m.customer_id = $2)
          AND ($3::INT IS NULL OR m.program_id = $3)
        GROUP BY t.stock_id
        HAVING SUM(t.quantity_change) <> 0
        ORDER BY t.stock_id
        "#,
    )
    .bind(as_of)
    .bind(customer_id)
    .bind(program_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
