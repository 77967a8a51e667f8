//! Material request handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::request::{
    RequestFilter, RequestItem, RequestedMaterial, UpdateRequestInput,
};
use crate::services::RequestService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    pub items: Vec<RequestItem>,
}

pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateRequestBody>,
) -> AppResult<StatusCode> {
    let service = RequestService::new(state.db.clone());
    service
        .create_batch(body.items, current_user.0.user_id)
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> AppResult<Json<Vec<RequestedMaterial>>> {
    let service = RequestService::new(state.db.clone());
    Ok(Json(service.list(filter).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(request_id): Path<i32>,
    Json(input): Json<UpdateRequestInput>,
) -> AppResult<StatusCode> {
    let service = RequestService::new(state.db.clone());
    service.update(request_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pending_count(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let service = RequestService::new(state.db.clone());
    let count = service.pending_count().await?;
    Ok(Json(json!({ "pending": count })))
}
