//! Request gate decisions.
//!
//! Classifies request paths as public or protected, turns the presented
//! session credential into an allow / redirect decision, and performs the
//! per-operation role check. Everything here is synchronous and free of I/O,
//! so a decision is always complete before any handler touches the database.

use chrono::{DateTime, Utc};

use crate::database::models::Role;
use crate::errors::AuthError;
use crate::utils::jwt::{JwtUtils, Principal};

/// Paths reachable without a credential. Matched exactly.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/health",
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/logout",
    "/api/auth/verify",
];

/// Public entry pages that must never be served from a cache.
const ENTRY_PAGES: &[&str] = &["/login", "/register"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Machine-readable reason attached to a redirect to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No credential was presented.
    Unauthorized,
    /// The credential failed signature, format or expiry checks.
    InvalidToken,
}

impl RedirectReason {
    pub fn code(&self) -> &'static str {
        match self {
            RedirectReason::Unauthorized => "unauthorized",
            RedirectReason::InvalidToken => "invalid_token",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RedirectReason::Unauthorized => "Please login first",
            RedirectReason::InvalidToken => "Session expired",
        }
    }

    /// Login page location carrying the reason and a human-readable message.
    pub fn login_url(&self) -> String {
        format!(
            "/login?error={}&message={}",
            self.code(),
            self.message().replace(' ', "%20")
        )
    }
}

/// Outcome of running the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through. `principal` is set for protected paths;
    /// `no_cache` asks the caller to forbid caching of the response.
    Allow {
        principal: Option<Principal>,
        no_cache: bool,
    },
    /// Send the caller to the login page; `clear_cookie` asks the caller to
    /// delete the stale session cookie.
    RedirectToLogin {
        reason: RedirectReason,
        clear_cookie: bool,
    },
}

/// Classify a request path against the fixed public allow-list.
pub fn classify(path: &str) -> RouteClass {
    if PUBLIC_PATHS.contains(&path) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

/// Verify an optional credential, distinguishing "absent" from "invalid".
pub fn verify_session(
    credential: Option<&str>,
    verifier: &JwtUtils,
    now: DateTime<Utc>,
) -> Result<Principal, AuthError> {
    let token = credential.ok_or(AuthError::MissingCredential)?;
    verifier.verify(token, now)
}

/// Decide what happens to a request for `path` presenting `credential`.
pub fn authorize(
    path: &str,
    credential: Option<&str>,
    verifier: &JwtUtils,
    now: DateTime<Utc>,
) -> GateDecision {
    match classify(path) {
        RouteClass::Public => GateDecision::Allow {
            principal: None,
            no_cache: ENTRY_PAGES.contains(&path),
        },
        RouteClass::Protected => match verify_session(credential, verifier, now) {
            Ok(principal) => GateDecision::Allow {
                principal: Some(principal),
                no_cache: true,
            },
            Err(AuthError::MissingCredential) => GateDecision::RedirectToLogin {
                reason: RedirectReason::Unauthorized,
                clear_cookie: false,
            },
            Err(_) => GateDecision::RedirectToLogin {
                reason: RedirectReason::InvalidToken,
                clear_cookie: true,
            },
        },
    }
}

/// Check that an authenticated principal holds the role an operation requires.
pub fn authorize_role(principal: &Principal, required: Role) -> Result<(), AuthError> {
    if principal.has_role(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole { required })
    }
}
