//! Customer and program handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::program::{
    CreateCustomerInput, CreateProgramInput, CustomerDetails, Program,
};
use crate::services::ProgramService;
use crate::AppState;

pub async fn create_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    current_user.0.require_any_role(&["admin"])?;

    let service = ProgramService::new(state.db.clone());
    let customer_id = service.create_customer(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "customer_id": customer_id }))))
}

pub async fn update_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(customer_id): Path<i32>,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<StatusCode> {
    current_user.0.require_any_role(&["admin"])?;

    let service = ProgramService::new(state.db.clone());
    service.update_customer(customer_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CustomerDetails>>> {
    let service = ProgramService::new(state.db.clone());
    Ok(Json(service.list_customers().await?))
}

pub async fn create_program(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProgramInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    current_user.0.require_any_role(&["admin"])?;

    let service = ProgramService::new(state.db.clone());
    let program_id = service.create_program(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "program_id": program_id }))))
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgramFilter {
    pub customer_id: Option<i32>,
}

pub async fn list_programs(
    State(state): State<AppState>,
    Query(filter): Query<ProgramFilter>,
) -> AppResult<Json<Vec<Program>>> {
    let service = ProgramService::new(state.db.clone());
    Ok(Json(service.list_programs(filter.customer_id).await?))
}
