//! Handler functions for the user directory endpoints.
//!
//! Any signed-in user may list either directory. Only id, name and email are
//! exposed.

use std::sync::Arc;

use crate::api::common::{ApiError, ApiResponse, db_pool, service_error_to_http};
use crate::database::models::{Role, UserSummary};
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{extract::State, response::Json as ResponseJson};

async fn directory(
    state: &AppState,
    role: Role,
) -> Result<ResponseJson<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let pool = db_pool(state).await?;
    let service = UserService::new(pool, state.bcrypt_cost);

    match service.list_by_role(role).await {
        Ok(users) => Ok(ResponseJson(ApiResponse::ok(users))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn list_teachers(
    State(state): State<Arc<AppState>>,
) -> Result<ResponseJson<ApiResponse<Vec<UserSummary>>>, ApiError> {
    directory(&state, Role::Teacher).await
}

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<ResponseJson<ApiResponse<Vec<UserSummary>>>, ApiError> {
    directory(&state, Role::Student).await
}
