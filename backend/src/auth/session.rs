//! Session cookie handling.
//!
//! Every read, write and deletion of the session cookie goes through this
//! module, along with the no-cache headers attached to gated responses.
//! Handlers never touch the cookie directly.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{CACHE_CONTROL, PRAGMA},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::{Duration, OffsetDateTime};

use crate::config::Config;

/// Name of the cookie carrying the session credential.
pub const SESSION_COOKIE: &str = "token";

pub const NO_STORE: &str = "no-store, max-age=0";

/// Attributes applied to every session cookie the server sets.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    secure: bool,
    max_age_seconds: i64,
}

impl SessionCookies {
    pub fn new(secure: bool, max_age_seconds: i64) -> Self {
        Self {
            secure,
            max_age_seconds,
        }
    }

    /// `Secure` only in production; lifetime matches the credential lifetime.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.environment.is_production(),
            config.jwt_expires_in_seconds.min(u32::MAX as u64) as i64,
        )
    }

    /// Attach a freshly issued credential to the response.
    pub fn store(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .max_age(Duration::seconds(self.max_age_seconds))
            .same_site(SameSite::Strict);
        jar.add(cookie)
    }

    /// Expire the session cookie on the client immediately.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .same_site(SameSite::Strict);
        jar.add(cookie)
    }
}

/// The credential presented by the client, if any. Empty values count as absent.
pub fn read_credential(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Forbid browsers and intermediaries from storing the response.
pub fn apply_no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
}
