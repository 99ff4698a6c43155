//! Central module for organizing the application's HTTP surface.
//!
//! This module acts as a top-level container for the API domains (reports,
//! feedback, user directories) and assembles them with the authentication
//! routes and page shells into one router behind the session gate.

pub mod common;
pub mod feedback;
pub mod health;
pub mod report;
pub mod user;


use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::Json as ResponseJson,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::api::common::ApiResponse;
use crate::auth::middleware::session_gate;
use crate::auth::routes::auth_router;
use crate::pages::page_router;
use crate::state::AppState;

/// Builds the full application router.
///
/// The session gate is layered over every route, including the fallback, so
/// no handler runs before the gate has decided.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/auth", auth_router())
        .merge(report::routes::report_router())
        .merge(feedback::routes::feedback_router())
        .merge(user::routes::user_router());

    Router::new()
        .merge(page_router())
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, ResponseJson<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        ResponseJson(ApiResponse::<()>::error("Resource not found", "not_found")),
    )
}
