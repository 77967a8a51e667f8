//! Incoming shipment handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::intake::{
    IncomingMaterialDetails, IntakeFilter, PendingCounts, SendIntakeInput, UpdateIntakeInput,
};
use crate::services::IntakeService;
use crate::AppState;

pub async fn send(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<SendIntakeInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let service = IntakeService::new(state.db.clone());
    let id = service.send(input, current_user.0.user_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "incoming_material_id": id }))))
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<IntakeFilter>,
) -> AppResult<Json<Vec<IncomingMaterialDetails>>> {
    let service = IntakeService::new(state.db.clone());
    Ok(Json(service.list(filter).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateIntakeInput>,
) -> AppResult<StatusCode> {
    let service = IntakeService::new(state.db.clone());
    service.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    current_user.0.require_any_role(&["admin", "warehouse"])?;

    let service = IntakeService::new(state.db.clone());
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pending_counts(State(state): State<AppState>) -> AppResult<Json<PendingCounts>> {
    let service = IntakeService::new(state.db.clone());
    let counts = service
        .pending_counts(&state.config.reporting.untracked_material_types)
        .await?;
    Ok(Json(counts))
}
