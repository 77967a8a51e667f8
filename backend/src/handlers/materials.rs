//! Material handlers
//!
//! The ledger operations (receive, move, remove, adjust) are gated on the
//! warehouse roles; reads only need a valid session.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{
    AdjustMaterialInput, MoveMaterialInput, ReceiveMaterialInput, RemoveMaterialInput,
};
use crate::services::material::{
    GroupedMaterial, MaterialDetails, MaterialFilter, TicketTransaction, UsageReason,
};
use crate::services::{LedgerService, MaterialService};
use crate::AppState;

const LEDGER_ROLES: &[&str] = &["admin", "warehouse"];

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<MaterialFilter>,
) -> AppResult<Json<Vec<MaterialDetails>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.list(filter).await?))
}

pub async fn grouped(State(state): State<AppState>) -> AppResult<Json<Vec<GroupedMaterial>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.grouped().await?))
}

pub async fn material_types(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.material_types().await?))
}

pub async fn usage_reasons(State(state): State<AppState>) -> AppResult<Json<Vec<UsageReason>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.usage_reasons().await?))
}

pub async fn receive(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<ReceiveMaterialInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    current_user.0.require_any_role(LEDGER_ROLES)?;

    let service = LedgerService::new(state.db.clone());
    let material_id = service.receive(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "material_id": material_id }))))
}

pub async fn move_material(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<i32>,
    Json(input): Json<MoveMaterialInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_any_role(LEDGER_ROLES)?;

    let service = LedgerService::new(state.db.clone());
    service.move_material(material_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<i32>,
    Json(input): Json<RemoveMaterialInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_any_role(LEDGER_ROLES)?;

    let service = LedgerService::new(state.db.clone());
    service.remove(material_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn adjust(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(material_id): Path<i32>,
    Json(input): Json<AdjustMaterialInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_any_role(LEDGER_ROLES)?;

    let service = LedgerService::new(state.db.clone());
    service.adjust(material_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub stock_id: String,
    pub status: String,
}

pub async fn update_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require_any_role(LEDGER_ROLES)?;

    let service = MaterialService::new(state.db.clone());
    let updated = service.update_status(&input.stock_id, &input.status).await?;
    Ok(Json(json!({ "updated": updated })))
}

#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    pub job_ticket: String,
}

pub async fn transactions_by_ticket(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> AppResult<Json<Vec<TicketTransaction>>> {
    let service = MaterialService::new(state.db.clone());
    Ok(Json(service.transactions_by_ticket(&query.job_ticket).await?))
}

pub async fn description(
    State(state): State<AppState>,
    Path(stock_id): Path<String>,
) -> AppResult<Json<Value>> {
    let service = MaterialService::new(state.db.clone());
    let description = service.description_by_stock_id(&stock_id).await?;
    Ok(Json(json!({ "stock_id": stock_id, "description": description })))
}
