//! Warehouse and location handlers

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::warehouse::{CreateLocationInput, LocationDetails};
use crate::services::WarehouseService;
use crate::AppState;

pub async fn create_location(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateLocationInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    current_user.0.require_any_role(&["admin", "warehouse"])?;

    let service = WarehouseService::new(state.db.clone());
    let location_id = service.create_location(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "location_id": location_id }))))
}

pub async fn list_locations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationDetails>>> {
    let service = WarehouseService::new(state.db.clone());
    Ok(Json(service.list_locations().await?))
}

pub async fn available_locations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationDetails>>> {
    let service = WarehouseService::new(state.db.clone());
    Ok(Json(service.available_locations().await?))
}
