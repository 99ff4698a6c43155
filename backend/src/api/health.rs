//! Liveness endpoint.
//!
//! Answers without opening the database; `db` only reports whether the pool
//! has been created yet.

use std::sync::Arc;

use axum::{extract::State, response::Json as ResponseJson};
use serde::Serialize;

use crate::api::common::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
}

#[axum::debug_handler]
pub async fn health(State(state): State<Arc<AppState>>) -> ResponseJson<ApiResponse<HealthResponse>> {
    let db = if state.db.is_connected() {
        "connected"
    } else {
        "not_connected"
    };

    ResponseJson(ApiResponse::success(
        HealthResponse {
            status: "ok",
            app_version: env!("CARGO_PKG_VERSION"),
            db,
        },
        "Service is healthy",
    ))
}
