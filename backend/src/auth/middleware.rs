//! Middleware for protecting authenticated routes.
//!
//! `session_gate` wraps the whole router. It runs the gate decision for every
//! request before any handler executes, and is the only place a gate decision
//! is turned into an HTTP response.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::api::common::ApiResponse;
use crate::auth::gate::{self, GateDecision, RedirectReason};
use crate::auth::session::{apply_no_cache, read_credential};
use crate::state::AppState;

/// Session authentication middleware.
///
/// On allow, the verified `Principal` (if any) is added to the request
/// extensions for handlers. On rejection, page requests are redirected to the
/// login page and `/api/...` requests get a 401 JSON body.
pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let credential = read_credential(&jar);

    match gate::authorize(&path, credential.as_deref(), &state.jwt, Utc::now()) {
        GateDecision::Allow {
            principal,
            no_cache,
        } => {
            if let Some(principal) = principal {
                request.extensions_mut().insert(principal);
            }

            let mut response = next.run(request).await;
            if no_cache {
                apply_no_cache(response.headers_mut());
            }
            response
        }
        GateDecision::RedirectToLogin {
            reason,
            clear_cookie,
        } => {
            tracing::debug!("Rejected {} ({})", path, reason.code());
            let jar = if clear_cookie {
                state.cookies.clear(jar)
            } else {
                jar
            };

            let mut response = (jar, rejection(&path, reason)).into_response();
            apply_no_cache(response.headers_mut());
            response
        }
    }
}

fn rejection(path: &str, reason: RedirectReason) -> Response {
    if path.starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(reason.message(), reason.code())),
        )
            .into_response()
    } else {
        Redirect::temporary(&reason.login_url()).into_response()
    }
}
