//! Defines the HTTP routes for the user directories.

use std::sync::Arc;

use super::handlers::{list_students, list_teachers};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn user_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/teachers", get(list_teachers))
        .route("/students", get(list_students))
}
