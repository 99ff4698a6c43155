//! Defines the HTTP routes for student reports.

use std::sync::Arc;

use super::handlers::{create_report, list_reports};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn report_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports", post(create_report).get(list_reports))
        .route("/report/send", post(create_report))
}
