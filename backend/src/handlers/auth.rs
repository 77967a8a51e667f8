//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::user::{
    CreateUserInput, CreatedUser, LoginInput, LoginResponse, UpdatePasswordInput,
};
use crate::services::UserService;
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = UserService::new(state.db.clone());
    let response = service.login(input, &state.config.jwt).await?;
    Ok(Json(response))
}

pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<CreatedUser>)> {
    current_user.0.require_any_role(&["admin"])?;

    let service = UserService::new(state.db.clone());
    let created = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdatePasswordInput>,
) -> AppResult<StatusCode> {
    let service = UserService::new(state.db.clone());
    service
        .update_password(current_user.0.user_id, input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
