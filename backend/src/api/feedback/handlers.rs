//! Handler functions for teacher feedback endpoints.

use std::sync::Arc;

use crate::api::common::{
    ApiError, ApiResponse, auth_error_to_http, db_pool, service_error_to_http,
};
use crate::auth::gate::authorize_role;
use crate::database::models::{Feedback, Role};
use crate::errors::ServiceError;
use crate::services::feedback_service::{FeedbackService, FeedbackView};
use crate::state::AppState;
use crate::utils::jwt::Principal;
use axum::{
    extract::{Extension, Json, State},
    response::Json as ResponseJson,
};
use validator::Validate;

use super::models::CreateFeedbackRequest;

/// Answer a report with feedback. Teachers only.
#[axum::debug_handler]
pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<ResponseJson<ApiResponse<Feedback>>, ApiError> {
    authorize_role(&principal, Role::Teacher).map_err(auth_error_to_http)?;
    payload
        .validate()
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    let pool = db_pool(&state).await?;
    let service = FeedbackService::new(pool);

    match service
        .create_feedback(principal.user_id(), &payload.report_id, &payload.message)
        .await
    {
        Ok(feedback) => Ok(ResponseJson(ApiResponse::success(
            feedback,
            "Feedback submitted successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Feedback received by the signed-in student, newest first. Students only.
#[axum::debug_handler]
pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ResponseJson<ApiResponse<Vec<FeedbackView>>>, ApiError> {
    authorize_role(&principal, Role::Student).map_err(auth_error_to_http)?;

    let pool = db_pool(&state).await?;
    let service = FeedbackService::new(pool);

    match service.list_for_student(principal.user_id()).await {
        Ok(feedback) => Ok(ResponseJson(ApiResponse::ok(feedback))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
