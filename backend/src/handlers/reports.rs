//! Report handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::report::{
    BalanceRow, CustomerBalance, TransactionLogRow, TransactionReportFilter,
    TransactionReportRow, WeeklyUsageRow,
};
use crate::services::ReportService;
use crate::AppState;

pub async fn transactions(
    State(state): State<AppState>,
    Query(filter): Query<TransactionReportFilter>,
) -> AppResult<Json<Vec<TransactionReportRow>>> {
    let service = ReportService::new(state.db.clone());
    Ok(Json(service.transactions(filter).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceQuery {
    pub as_of: Option<DateTime<Utc>>,
    pub customer_id: Option<i32>,
    pub program_id: Option<i32>,
}

pub async fn balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> AppResult<Json<Vec<BalanceRow>>> {
    let service = ReportService::new(state.db.clone());
    let as_of = query.as_of.unwrap_or_else(Utc::now);
    Ok(Json(
        service
            .balance(as_of, query.customer_id, query.program_id)
            .await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct CustomerBalancesBody {
    pub customer_ids: Vec<i32>,
    pub as_of: Option<DateTime<Utc>>,
}

pub async fn customer_balances(
    State(state): State<AppState>,
    Json(body): Json<CustomerBalancesBody>,
) -> AppResult<Json<Vec<CustomerBalance>>> {
    let service = ReportService::new(state.db.clone());
    let as_of = body.as_of.unwrap_or_else(Utc::now);
    Ok(Json(
        service.balances_by_customer(body.customer_ids, as_of).await?,
    ))
}

pub async fn weekly_usage(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeeklyUsageRow>>> {
    let service = ReportService::new(state.db.clone());
    Ok(Json(
        service
            .weekly_usage(&state.config.reporting.untracked_material_types)
            .await?,
    ))
}

pub async fn transaction_log(
    State(state): State<AppState>,
    Query(filter): Query<TransactionReportFilter>,
) -> AppResult<Json<Vec<TransactionLogRow>>> {
    let service = ReportService::new(state.db.clone());
    Ok(Json(service.transaction_log(filter).await?))
}
