//! Defines the HTTP routes for teacher feedback.

use std::sync::Arc;

use super::handlers::{create_feedback, list_feedback};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn feedback_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feedback", post(create_feedback).get(list_feedback))
        .route("/feedback/student", get(list_feedback))
}
