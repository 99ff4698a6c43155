//! Handler functions for student report endpoints.
//!
//! The role check runs before the database is touched.

use std::sync::Arc;

use crate::api::common::{
    ApiError, ApiResponse, auth_error_to_http, db_pool, service_error_to_http,
};
use crate::auth::gate::authorize_role;
use crate::database::models::{Report, Role};
use crate::errors::ServiceError;
use crate::services::report_service::{ReportService, ReportView};
use crate::state::AppState;
use crate::utils::jwt::Principal;
use axum::{
    extract::{Extension, Json, State},
    response::Json as ResponseJson,
};
use validator::Validate;

use super::models::CreateReportRequest;

/// Send a report to a teacher. Students only.
#[axum::debug_handler]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<ResponseJson<ApiResponse<Report>>, ApiError> {
    authorize_role(&principal, Role::Student).map_err(auth_error_to_http)?;
    payload
        .validate()
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    let pool = db_pool(&state).await?;
    let service = ReportService::new(pool);

    match service
        .create_report(principal.user_id(), &payload.teacher_id, &payload.message)
        .await
    {
        Ok(report) => Ok(ResponseJson(ApiResponse::success(
            report,
            "Report submitted successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Reports sent to the signed-in teacher, newest first. Teachers only.
#[axum::debug_handler]
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ResponseJson<ApiResponse<Vec<ReportView>>>, ApiError> {
    authorize_role(&principal, Role::Teacher).map_err(auth_error_to_http)?;

    let pool = db_pool(&state).await?;
    let service = ReportService::new(pool);

    match service.list_for_teacher(principal.user_id()).await {
        Ok(reports) => Ok(ResponseJson(ApiResponse::ok(reports))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
