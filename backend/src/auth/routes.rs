//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle registration, login, logout and session checks.
//! They are nested under `/api/auth` by the main router, which applies the
//! session gate to all of them.

use std::sync::Arc;

use crate::api::report::handlers::list_reports;
use crate::auth::handlers::*;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verify", get(verify))
        .route("/me", get(me))
        // Older clients read a teacher's inbox from here.
        .route("/reports", get(list_reports))
}
