//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration, login,
//! logout and session checks, and interact with the `auth::service` for core
//! business logic. Cookie reads and writes are delegated to `auth::session`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::api::common::{ApiError, ApiResponse, db_pool, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::auth::session::{apply_no_cache, read_credential};
use crate::errors::AuthError;
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::jwt::Principal;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<AuthResponse>>), ApiError> {
    let pool = db_pool(&state).await?;
    let auth_service = AuthService::new(pool, &state.jwt, state.bcrypt_cost);

    match auth_service.register(payload).await {
        Ok(authenticated) => Ok((
            state.cookies.store(jar, authenticated.token),
            ResponseJson(ApiResponse::success(
                AuthResponse {
                    user: authenticated.user,
                },
                "Registration successful",
            )),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, ResponseJson<ApiResponse<AuthResponse>>), ApiError> {
    let pool = db_pool(&state).await?;
    let auth_service = AuthService::new(pool, &state.jwt, state.bcrypt_cost);

    match auth_service.login(payload).await {
        Ok(authenticated) => Ok((
            state.cookies.store(jar, authenticated.token),
            ResponseJson(ApiResponse::success(
                AuthResponse {
                    user: authenticated.user,
                },
                "Login successful",
            )),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request.
///
/// Only the cookie is removed. The credential itself stays valid until it
/// expires, as there is no server-side session store.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, HeaderMap, ResponseJson<ApiResponse<()>>) {
    let mut headers = HeaderMap::new();
    apply_no_cache(&mut headers);

    (
        state.cookies.clear(jar),
        headers,
        ResponseJson(ApiResponse::<()>::done("Logged out successfully")),
    )
}

/// Report whether the presented cookie carries a valid session.
///
/// Read-only: the cookie is never modified here, even when it is stale.
#[axum::debug_handler]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (StatusCode, ResponseJson<ApiResponse<VerifyResponse>>) {
    let verified = read_credential(&jar)
        .ok_or(AuthError::MissingCredential)
        .and_then(|token| state.jwt.validate_token(&token));

    match verified {
        Ok(_) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(
                VerifyResponse {
                    authenticated: true,
                },
                "Authenticated",
            )),
        ),
        Err(error) => (
            StatusCode::UNAUTHORIZED,
            ResponseJson(ApiResponse {
                success: false,
                data: Some(VerifyResponse {
                    authenticated: false,
                }),
                message: error.to_string(),
                error: None,
                timestamp: Utc::now().to_rfc3339(),
            }),
        ),
    }
}

/// Get current user information for the session principal
#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, ApiError> {
    let pool = db_pool(&state).await?;
    let user_service = UserService::new(pool, state.bcrypt_cost);

    match user_service.get_user_required(principal.user_id()).await {
        Ok(user) => Ok(ResponseJson(ApiResponse::ok(UserInfo::from(user)))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
